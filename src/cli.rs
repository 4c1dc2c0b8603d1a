//! # Command Line
//!
//! One-shot access to every calculator: `bitbench base ff --from 16`.
//! Running `bitbench` with no subcommand opens the dashboard instead.
//!
//! Each subcommand maps to one core function and prints plain aligned text.
//! Errors carry the core error type so `main` can print them and exit
//! non-zero.

use clap::{Parser, Subcommand};
use thiserror::Error;

use crate::core::ascii::{ascii_to_hex, hex_to_ascii};
use crate::core::bits::{OperandError, PadSide, pad_binary, reverse_bits, xor_values};
use crate::core::config::ResolvedConfig;
use crate::core::kmap::{KarnaughMap, KmapError, parse_minterms};
use crate::core::modules::{self, LayoutError, ModuleKey, ModuleLayout};
use crate::core::pow2::{MAX_EXPONENT, Pow2};
use crate::core::radix::{
    BaseReadout, RadixError, check_width, format_grouped_decimal, parse_integer, signed_readout,
};
use crate::core::truth_table::{TableError, build_truth_table, build_truth_table_strict};
use crate::core::twos::encode_twos_complement;
use crate::core::units::{
    self, Conversion, FREQ_UNITS, TIME_UNITS, convert_size, format_number, frequency_hz,
    period_seconds, throughput,
};

#[derive(Parser)]
#[command(
    name = "bitbench",
    version,
    about = "Engineering calculators: radix, bits, units and Boolean logic"
)]
pub struct Args {
    /// Log level (error, warn, info, debug, trace)
    #[arg(long, global = true)]
    pub log_level: Option<String>,

    /// Report malformed Boolean expressions instead of treating them as false
    #[arg(long, global = true)]
    pub strict: bool,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Subcommand, Debug, Clone, PartialEq)]
pub enum Command {
    /// Show an integer in binary, octal, decimal and hex
    Base {
        #[arg(allow_hyphen_values = true)]
        value: String,
        /// Base the value is written in (2..=36)
        #[arg(short, long, default_value_t = 10)]
        from: u32,
        /// Width of the zero-padded binary (defaults to [base] pad_bits)
        #[arg(short, long)]
        pad: Option<usize>,
        /// Also read binary input as two's complement
        #[arg(long)]
        twos: bool,
    },
    /// Decode a two's-complement bit string, or encode a decimal with --width
    Twos {
        #[arg(allow_hyphen_values = true)]
        value: String,
        #[arg(short, long)]
        width: Option<usize>,
    },
    /// Reverse the bit order of a value
    Reverse {
        #[arg(allow_hyphen_values = true)]
        value: String,
        #[arg(short, long, default_value_t = 2)]
        base: u32,
        /// Width to reverse at (defaults to the width implied by the digits)
        #[arg(short, long)]
        width: Option<usize>,
    },
    /// Zero-pad a binary string
    Pad {
        bits: String,
        #[arg(short, long, default_value_t = 8)]
        len: usize,
        /// Pad on the right instead of the left
        #[arg(long)]
        right: bool,
    },
    /// XOR two values, each in its own base
    Xor {
        #[arg(allow_hyphen_values = true)]
        first: String,
        #[arg(allow_hyphen_values = true)]
        second: String,
        #[arg(long, default_value_t = 2)]
        base1: u32,
        #[arg(long, default_value_t = 2)]
        base2: u32,
        /// Width of the zero-padded binary (defaults to [xor] pad_bits)
        #[arg(short, long)]
        width: Option<usize>,
    },
    /// Powers of two and the ranges they bound
    Pow2 { n: u32 },
    /// Text to hex bytes
    Ascii { text: String },
    /// Hex bytes to text
    Hex { hex: String },
    /// Period to frequency
    Period {
        value: f64,
        #[arg(default_value = "ns")]
        unit: String,
    },
    /// Frequency to period
    Freq {
        value: f64,
        #[arg(default_value = "MHz")]
        unit: String,
    },
    /// Data size in every binary and decimal unit
    Size {
        value: f64,
        #[arg(default_value = "B")]
        unit: String,
    },
    /// Bus throughput from width and clock
    Throughput {
        width: f64,
        clock: f64,
        #[arg(default_value = "MHz")]
        unit: String,
    },
    /// Truth table of a Boolean expression
    Truth { expression: String },
    /// Simplify a function given by its minterms
    ///
    /// Grouping is greedy: the result is always correct but not always
    /// minimal.
    Kmap {
        /// Comma-separated minterm indices, e.g. 0,1,3,7
        minterms: String,
        /// Number of variables (2..=4, defaults to [kmap] variables)
        #[arg(short, long)]
        variables: Option<usize>,
    },
    /// Show or change which dashboard modules are visible
    Modules {
        #[command(subcommand)]
        action: ModulesCommand,
    },
}

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum ModulesCommand {
    List,
    Show { id: String },
    Hide { id: String },
    Reset,
}

#[derive(Debug, Error)]
pub enum CliError {
    #[error(transparent)]
    Radix(#[from] RadixError),
    #[error(transparent)]
    Operand(#[from] OperandError),
    #[error(transparent)]
    Table(#[from] TableError),
    #[error(transparent)]
    Kmap(#[from] KmapError),
    #[error(transparent)]
    Layout(#[from] LayoutError),
    #[error("{0}")]
    Invalid(String),
}

/// Run `command` and return what it prints.
pub fn execute(command: &Command, config: &ResolvedConfig) -> Result<String, CliError> {
    match command {
        Command::Base {
            value,
            from,
            pad,
            twos,
        } => {
            let pad_bits = check_width(pad.unwrap_or(config.base_pad_bits))?;
            let parsed = parse_integer(value, *from)?;
            let readout = BaseReadout::from_value(&parsed, pad_bits);
            let mut rows = readout_rows(&readout);
            if *twos && *from != 2 {
                rows.push((
                    "Signed".to_string(),
                    "two's complement applies to binary input".to_string(),
                ));
            } else if *twos {
                let signed = signed_readout(value)?;
                rows.push((format!("Signed ({}-bit)", signed.width), signed.decimal));
                rows.push(("Signed hex".to_string(), signed.hex));
            }
            Ok(aligned(&rows))
        }
        Command::Twos { value, width } => match width {
            Some(width) => {
                check_width(*width)?;
                let parsed = parse_integer(value, 10)?;
                encode_twos_complement(&parsed, *width).ok_or_else(|| {
                    CliError::Invalid(format!("{value} does not fit in {width} bits"))
                })
            }
            None => {
                let signed = signed_readout(value)?;
                Ok(aligned(&[
                    ("Width".to_string(), signed.width.to_string()),
                    ("Decimal".to_string(), signed.decimal),
                    ("Hex".to_string(), signed.hex),
                ]))
            }
        },
        Command::Reverse { value, base, width } => {
            let reversed = reverse_bits(value, *base, *width)?;
            Ok(aligned(&[
                ("Width".to_string(), reversed.width.to_string()),
                ("Binary".to_string(), reversed.binary),
                (format!("Base {base}"), reversed.same_base),
            ]))
        }
        Command::Pad { bits, len, right } => {
            let side = if *right { PadSide::Right } else { PadSide::Left };
            Ok(pad_binary(bits, check_width(*len)?, side))
        }
        Command::Xor {
            first,
            second,
            base1,
            base2,
            width,
        } => {
            let xor = xor_values(
                (first, *base1),
                (second, *base2),
                width.unwrap_or(config.xor_pad_bits),
            )?;
            Ok(aligned(&readout_rows(&xor.readout)))
        }
        Command::Pow2 { n } => {
            if *n > MAX_EXPONENT {
                return Err(CliError::Invalid(format!(
                    "n must be at most {MAX_EXPONENT}"
                )));
            }
            let p = Pow2::new(*n);
            let mut rows = vec![
                ("2^n".to_string(), p.decimal()),
                ("Hex".to_string(), p.hex()),
                ("2^n - 1".to_string(), p.max_unsigned_decimal()),
                ("Binary".to_string(), p.binary()),
                ("Signed range".to_string(), p.signed_range()),
            ];
            rows.extend(
                p.sizes()
                    .iter()
                    .map(|(unit, v)| (unit.to_string(), format_grouped_decimal(v))),
            );
            Ok(aligned(&rows))
        }
        Command::Ascii { text } => Ok(ascii_to_hex(text)),
        Command::Hex { hex } => Ok(hex_to_ascii(hex)),
        Command::Period { value, unit } => {
            let seconds = period_seconds(*value, unit).ok_or_else(|| {
                CliError::Invalid(format!("'{value} {unit}' is not a positive period"))
            })?;
            Ok(conversion_rows(&units::spread(
                units::period_to_frequency(seconds),
                FREQ_UNITS,
            )))
        }
        Command::Freq { value, unit } => {
            let hz = frequency_hz(*value, unit).ok_or_else(|| {
                CliError::Invalid(format!("'{value} {unit}' is not a positive frequency"))
            })?;
            Ok(conversion_rows(&units::spread(
                units::frequency_to_period(hz),
                TIME_UNITS,
            )))
        }
        Command::Size { value, unit } => {
            let out = convert_size(*value, unit).ok_or_else(|| {
                CliError::Invalid(format!("'{value} {unit}' is not a valid size"))
            })?;
            Ok(format!(
                "Binary (IEC)\n{}Decimal (SI)\n{}",
                conversion_rows(&out.binary),
                conversion_rows(&out.decimal)
            ))
        }
        Command::Throughput { width, clock, unit } => {
            let rate = throughput(*width, *clock, unit)
                .ok_or_else(|| CliError::Invalid(format!("unknown clock unit '{unit}'")))?;
            Ok(aligned(&[
                ("bit/s".to_string(), format_number(rate.bits_per_sec)),
                ("Gb/s".to_string(), format_number(rate.gbps)),
                ("Mb/s".to_string(), format_number(rate.mbps)),
                ("MB/s".to_string(), format_number(rate.megabytes_per_sec)),
                ("MiB/s".to_string(), format_number(rate.mebibytes_per_sec)),
            ]))
        }
        Command::Truth { expression } => {
            let table = if config.strict_boolean {
                build_truth_table_strict(expression)?
            } else {
                build_truth_table(expression)?
            };
            Ok(table.to_tsv())
        }
        Command::Kmap {
            minterms,
            variables,
        } => {
            let v = variables.unwrap_or(config.kmap_variables);
            let map = KarnaughMap::new(v, &parse_minterms(minterms, v))?;
            Ok(format!("{}\n{}", map.to_tsv(), map.minimize()))
        }
        Command::Modules { action } => {
            let mut layout = modules::load_layout();
            let (output, changed) = apply_modules(action, &mut layout)?;
            if changed {
                modules::save_layout(&layout)?;
            }
            Ok(output)
        }
    }
}

/// Apply a `modules` subcommand to `layout`. Returns the output and whether
/// the layout changed.
pub fn apply_modules(
    action: &ModulesCommand,
    layout: &mut ModuleLayout,
) -> Result<(String, bool), CliError> {
    let lookup = |id: &str| {
        ModuleKey::from_id(id).ok_or_else(|| CliError::Invalid(format!("unknown module '{id}'")))
    };
    match action {
        ModulesCommand::List => {
            let rows: Vec<(String, String)> = layout
                .entries()
                .iter()
                .map(|e| {
                    let state = if e.visible { "visible" } else { "hidden" };
                    (e.key.id().to_string(), format!("{state:<8}{}", e.key.title()))
                })
                .collect();
            Ok((aligned(&rows), false))
        }
        ModulesCommand::Show { id } => {
            let key = lookup(id)?;
            layout.set_visible(key, true);
            Ok((format!("{} shown", key.title()), true))
        }
        ModulesCommand::Hide { id } => {
            let key = lookup(id)?;
            layout.set_visible(key, false);
            Ok((format!("{} hidden", key.title()), true))
        }
        ModulesCommand::Reset => {
            *layout = ModuleLayout::default();
            Ok(("Layout reset".to_string(), true))
        }
    }
}

fn readout_rows(readout: &BaseReadout) -> Vec<(String, String)> {
    vec![
        ("Binary".to_string(), readout.binary.clone()),
        ("Octal".to_string(), readout.octal.clone()),
        ("Decimal".to_string(), readout.decimal.clone()),
        ("Hex".to_string(), readout.hex.clone()),
        ("Padded".to_string(), readout.padded_binary.clone()),
    ]
}

/// One `value unit` line per conversion, each ending in a newline.
fn conversion_rows(conversions: &[Conversion]) -> String {
    conversions
        .iter()
        .map(|c| format!("{} {}\n", format_number(c.value), c.unit))
        .collect()
}

/// `label  value` lines with labels padded to a common width.
fn aligned(rows: &[(String, String)]) -> String {
    let width = rows.iter().map(|(label, _)| label.len()).max().unwrap_or(0);
    rows.iter()
        .map(|(label, value)| format!("{label:<width$}  {value}"))
        .collect::<Vec<_>>()
        .join("\n")
}
