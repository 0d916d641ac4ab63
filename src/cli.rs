//! Command-line argument definitions (SPEC_FULL.md §6.1): two subcommand
//! groups, `rhp` and `tto`, each mirroring its library's public surface.

use clap::{Args, Parser, Subcommand};
use clap_complete::Shell;

#[derive(Parser)]
#[command(name = "textkit")]
#[command(about = "Developer text utilities: a Ruby Hash#inspect parser and a Thai text obfuscator")]
#[command(author = "Dirk Loss <mail@dirk-loss.de>")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Controls how non-fatal diagnostics surface
    #[arg(long = "error-report", global = true, default_value = "print")]
    pub error_report: String,

    /// Path to a config file (overrides search order / TEXTKIT_CONFIG)
    #[arg(long = "config", global = true)]
    pub config: Option<String>,
}

#[derive(Subcommand)]
pub enum Command {
    /// Ruby-Hash Parser operations
    Rhp {
        #[command(subcommand)]
        action: RhpCommand,
    },
    /// Thai Text Obfuscator operations
    Tto {
        #[command(subcommand)]
        action: TtoCommand,
    },
    /// Print a shell completion script to stdout
    Completions {
        shell: Shell,
    },
}

#[derive(Subcommand)]
pub enum RhpCommand {
    /// Parse Ruby-hash-inspect text and print JSON
    Parse {
        #[command(flatten)]
        opts: RhpOptsArgs,
        /// Print compact JSON instead of pretty-printed
        #[arg(long)]
        compact: bool,
        /// Input file (stdin if omitted)
        file: Option<String>,
    },
    /// Validate Ruby-hash-inspect text, never exits with a parser panic
    Validate {
        /// Exit non-zero when the input is invalid
        #[arg(long)]
        exit_code: bool,
        file: Option<String>,
    },
    /// Pretty-print the untyped AST
    Ast {
        #[command(flatten)]
        opts: RhpOptsArgs,
        file: Option<String>,
    },
}

#[derive(Args, Default, Clone)]
pub struct RhpOptsArgs {
    /// Named preset (strict, preserving, json5, lenient, pedantic)
    #[arg(long)]
    pub preset: Option<String>,
    #[arg(long)]
    pub max_depth: Option<usize>,
    #[arg(long)]
    pub allow_implicit_hash: Option<bool>,
    #[arg(long)]
    pub symbol_handler: Option<String>,
    #[arg(long)]
    pub non_finite_numbers: Option<String>,
    #[arg(long)]
    pub object_behavior: Option<String>,
    #[arg(long)]
    pub binary_strategy: Option<String>,
    #[arg(long)]
    pub range_strategy: Option<String>,
    #[arg(long)]
    pub big_decimal_strategy: Option<String>,
    #[arg(long)]
    pub set_strategy: Option<String>,
    #[arg(long)]
    pub cyclic_strategy: Option<String>,
}

impl From<RhpOptsArgs> for crate::config::RhpOverrides {
    fn from(a: RhpOptsArgs) -> Self {
        Self {
            max_depth: a.max_depth,
            allow_implicit_hash: a.allow_implicit_hash,
            symbol_handler: a.symbol_handler,
            non_finite_numbers: a.non_finite_numbers,
            object_behavior: a.object_behavior,
            binary_strategy: a.binary_strategy,
            range_strategy: a.range_strategy,
            big_decimal_strategy: a.big_decimal_strategy,
            set_strategy: a.set_strategy,
            cyclic_strategy: a.cyclic_strategy,
            preset: a.preset,
        }
    }
}

#[derive(Subcommand)]
pub enum TtoCommand {
    /// Rewrite Thai text under a strategy/density budget
    Obfuscate {
        #[command(flatten)]
        opts: TtoOptsArgs,
        /// Print {output, stats, warnings} as JSON instead of plain text
        #[arg(long)]
        json: bool,
        file: Option<String>,
    },
    /// Print `analyzeText` output as JSON
    Analyze { file: Option<String> },
    /// Print normalized text
    Normalize {
        /// Disable the reverse-homoglyph mapping step
        #[arg(long)]
        no_reverse_map: bool,
        file: Option<String>,
    },
    /// Print `detect` output as JSON
    Detect { file: Option<String> },
}

#[derive(Args, Default, Clone)]
pub struct TtoOptsArgs {
    #[arg(long)]
    pub density: Option<f64>,
    /// Comma-separated ordered strategy list
    #[arg(long, value_delimiter = ',')]
    pub strategies: Option<Vec<String>>,
    #[arg(long)]
    pub tone_strategy: Option<String>,
    #[arg(long)]
    pub font_style: Option<String>,
    #[arg(long)]
    pub seed: Option<u32>,
    #[arg(long)]
    pub min_confidence: Option<f64>,
    #[arg(long)]
    pub inject_zero_width: bool,
    /// Characters to leave untouched regardless of strategy
    #[arg(long, value_delimiter = ',')]
    pub preserve_chars: Option<Vec<char>>,
}

impl From<TtoOptsArgs> for crate::config::TtoOverrides {
    fn from(a: TtoOptsArgs) -> Self {
        Self {
            density: a.density,
            strategies: a.strategies,
            tone_strategy: a.tone_strategy,
            font_style: a.font_style,
            random_seed: a.seed,
            preserve_spaces: None,
            preserve_newlines: None,
            min_confidence: a.min_confidence,
            inject_zero_width: if a.inject_zero_width { Some(true) } else { None },
            preserve_characters: a.preserve_chars,
            symbol_injection_rate: None,
        }
    }
}
