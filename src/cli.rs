use clap::{builder::PossibleValuesParser, builder::TypedValueParser, Parser};

use patterns::Pattern;

#[derive(Parser, Debug, Default)]
#[command(name = "patterns", version, about = "Runs the client code of Gang-of-Four pattern examples")]
pub struct Args {
    /// Patterns to run (all if omitted)
    #[arg(value_parser = PossibleValuesParser::new(Pattern::NAMES).try_map(|name| name.parse::<Pattern>()))]
    pub pattern: Vec<Pattern>,

    /// Iterate the word collection in reverse first
    #[arg(long)]
    pub reverse: bool,

    /// Enable debug output (overridden by RUST_LOG)
    #[arg(short, long)]
    pub verbose: bool,
}

impl Args {
    /// The selected patterns in the order given, or every pattern
    pub fn patterns(&self) -> Vec<Pattern> {
        if self.pattern.is_empty() {
            Pattern::ALL.to_vec()
        } else {
            self.pattern.clone()
        }
    }
}

#[cfg(test)]
mod tests {

    use super::*;

    #[test_log::test]
    fn test_parse_arguments() {
        let args = Args::parse_from(["patterns"]);
        assert_eq!(args.patterns(), Pattern::ALL);
        assert!(!args.reverse);

        let args = Args::parse_from(["patterns", "iterator", "state", "--reverse", "-v"]);
        assert_eq!(args.patterns(), &[Pattern::Iterator, Pattern::State]);
        assert!(args.reverse && args.verbose);

        assert!(Args::try_parse_from(["patterns", "adapter"]).is_err());
    }
}
