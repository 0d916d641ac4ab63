use std::io::Read;
use std::process::ExitCode;

use clap::{CommandFactory, Parser};
use clap_complete::generate;

use textkit::cli::{Cli, Command, RhpCommand, TtoCommand};
use textkit::config::{self, GlobalConfig};
use textkit::config_file::ConfigFile;
use textkit::error_handling::{Diagnostics, ErrorReportStyle, Severity};
use textkit::{rhp, tto};

fn read_input(file: &Option<String>) -> anyhow::Result<String> {
    match file {
        Some(path) if path != "-" => Ok(std::fs::read_to_string(path)?),
        _ => {
            let mut buf = String::new();
            std::io::stdin().read_to_string(&mut buf)?;
            Ok(buf)
        }
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    if let Command::Completions { shell } = &cli.command {
        let mut cmd = Cli::command();
        let name = cmd.get_name().to_string();
        generate(*shell, &mut cmd, name, &mut std::io::stdout());
        return ExitCode::SUCCESS;
    }

    let style: ErrorReportStyle = match cli.error_report.parse() {
        Ok(s) => s,
        Err(e) => {
            eprintln!("textkit: {e}");
            return ExitCode::from(2);
        }
    };
    let global = GlobalConfig { error_report: style };
    let mut diagnostics = Diagnostics::new(global.error_report);

    let config_file = match ConfigFile::load(cli.config.as_deref()) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("textkit: failed to load config file: {e:#}");
            return ExitCode::from(2);
        }
    };

    let result = match &cli.command {
        Command::Rhp { action } => run_rhp(action, &config_file, &mut diagnostics),
        Command::Tto { action } => run_tto(action, &config_file, &mut diagnostics),
        Command::Completions { .. } => unreachable!("handled above"),
    };

    diagnostics.print_summary();

    match result {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::from(1),
        Err(e) => {
            eprintln!("textkit: {e:#}");
            ExitCode::from(2)
        }
    }
}

/// Returns `Ok(true)` on success, `Ok(false)` for a reported data error
/// (invalid input under the CLI's own contract), `Err` for usage/I-O errors.
fn run_rhp(
    action: &RhpCommand,
    config_file: &ConfigFile,
    diagnostics: &mut Diagnostics,
) -> anyhow::Result<bool> {
    match action {
        RhpCommand::Parse { opts, compact, file } => {
            let parse_opts = config::build_rhp_options(&config_file.rhp, &opts.clone().into())?;
            let text = read_input(file)?;
            let serialize_opts = rhp::serializer::SerializeOptions {
                pretty: !compact,
                indent_width: 2,
            };
            match rhp::to_json_with(&text, &parse_opts, &serialize_opts) {
                Ok(json) => {
                    println!("{json}");
                    Ok(true)
                }
                Err(e) => {
                    diagnostics.record(Severity::Medium, e.to_string(), None);
                    Ok(false)
                }
            }
        }
        RhpCommand::Validate { exit_code, file } => {
            let text = read_input(file)?;
            let result = rhp::validate(&text);
            let json = serde_json::to_string(&result)?;
            println!("{json}");
            match result {
                rhp::ValidateResult::Valid { .. } => Ok(true),
                rhp::ValidateResult::Invalid { .. } => Ok(!*exit_code),
            }
        }
        RhpCommand::Ast { opts, file } => {
            let parse_opts = config::build_rhp_options(&config_file.rhp, &opts.clone().into())?;
            let text = read_input(file)?;
            match rhp::parse_to_ast(&text, &parse_opts) {
                Ok(ast) => {
                    println!("{ast:#?}");
                    Ok(true)
                }
                Err(e) => {
                    diagnostics.record(Severity::Medium, e.to_string(), None);
                    Ok(false)
                }
            }
        }
    }
}

fn run_tto(
    action: &TtoCommand,
    config_file: &ConfigFile,
    diagnostics: &mut Diagnostics,
) -> anyhow::Result<bool> {
    match action {
        TtoCommand::Obfuscate { opts, json, file } => {
            let tto_opts = config::build_tto_options(&config_file.tto, &opts.clone().into())?;
            let text = read_input(file)?;
            tto::validate_input(&text).map_err(|e| anyhow::anyhow!(e))?;
            let result = tto::obfuscate(&text, &tto_opts);
            for warning in &result.warnings {
                diagnostics.record(Severity::Soft, warning.clone(), None);
            }
            if *json {
                let payload = serde_json::json!({
                    "output": result.output,
                    "stats": {
                        "totalClusters": result.stats.total_clusters,
                        "obfuscatedClusters": result.stats.obfuscated_clusters,
                    },
                    "warnings": result.warnings,
                });
                println!("{}", serde_json::to_string_pretty(&payload)?);
            } else {
                println!("{}", result.output);
            }
            Ok(true)
        }
        TtoCommand::Analyze { file } => {
            let text = read_input(file)?;
            tto::validate_input(&text).map_err(|e| anyhow::anyhow!(e))?;
            let analysis = tto::analyze_text(&text);
            let payload = serde_json::json!({
                "thaiRatio": analysis.thai_ratio,
                "effectiveness": analysis.effectiveness,
                "breakdown": {
                    "consonants": analysis.breakdown.consonants,
                    "vowels": analysis.breakdown.vowels,
                    "toneMarks": analysis.breakdown.tone_marks,
                    "numerals": analysis.breakdown.numerals,
                    "other": analysis.breakdown.other,
                },
                "recommendations": analysis.recommendations,
            });
            println!("{}", serde_json::to_string_pretty(&payload)?);
            Ok(true)
        }
        TtoCommand::Normalize { no_reverse_map, file } => {
            let text = read_input(file)?;
            tto::validate_input(&text).map_err(|e| anyhow::anyhow!(e))?;
            let norm_opts = tto::normalize::NormalizeOptions { reverse_homoglyphs: !no_reverse_map };
            println!("{}", tto::normalize(&text, &norm_opts));
            Ok(true)
        }
        TtoCommand::Detect { file } => {
            let text = read_input(file)?;
            tto::validate_input(&text).map_err(|e| anyhow::anyhow!(e))?;
            let detected = tto::detect(&text);
            let payload = serde_json::json!({
                "hasZeroWidth": detected.has_zero_width,
                "hasLatinMix": detected.has_latin_mix,
                "suspicionScore": detected.suspicion_score,
            });
            println!("{}", serde_json::to_string_pretty(&payload)?);
            Ok(true)
        }
    }
}
