/// Parse a pair of values separated by `x` or `,`, e.g. an image size given
/// as `640x480` or `640,480`.
pub fn parse_pair<T: std::str::FromStr>(s: &str) -> Result<(T, T), String> {
    let (a, b) = s.split_once(|c| c == 'x' || c == ',')
        .ok_or_else(|| format!("could not find `x` or `,` in `{s}`"))?;
    let first  = a.trim().parse().map_err(|_| format!("could not parse `{a}`"))?;
    let second = b.trim().parse().map_err(|_| format!("could not parse `{b}`"))?;
    Ok((first, second))
}

/// Group numeric digits to facilitate reading long numbers
pub fn group_digits<F: std::fmt::Display>(n: F) -> String {
    use numsep::{separate, Locale};
    separate(n, Locale::English)
}

pub mod timing {

    use super::group_digits;
    use std::io::Write;
    use std::time::Instant;

    /// Coarse phase timer for stdout progress reports
    pub struct Progress {
        previous: Instant,
    }

    impl Progress {

        #[allow(clippy::new_without_default)]
        pub fn new() -> Self { Self { previous: Instant::now() } }

        /// Print message, append ellipsis, flush stdout, stay on same line, start timer.
        pub fn start(&mut self, message: &str) {
            print!("{message} ... ");
            std::io::stdout().flush().unwrap();
            self.start_timer();
        }

        // Print time elapsed since last start or done
        pub fn done(&mut self) {
            println!("{} ms", group_digits(self.previous.elapsed().as_millis()));
            self.start_timer();
        }

        // Print message followed by time elapsed since last start or done
        pub fn done_with_message(&mut self, message: &str) {
            println!("{message}: {} ms",
                     group_digits(self.previous.elapsed().as_millis()));
            self.start_timer();
        }

        fn start_timer(&mut self) { self.previous = Instant::now() }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest(/**/  input  , expected,
             case("640x480", (640, 480)),
             case("12,7"   , ( 12,   7)),
             case("3 , 4"  , (  3,   4)),
    )]
    fn parse_pair_accepts_both_separators(input: &str, expected: (usize, usize)) {
        assert_eq!(parse_pair::<usize>(input).unwrap(), expected);
    }

    #[rstest(input, case("640"), case("ax2"), case("4x"))]
    fn parse_pair_rejects_garbage(input: &str) {
        assert!(parse_pair::<usize>(input).is_err());
    }
}
