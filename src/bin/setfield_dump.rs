//! Convert set-field actions between text and wire form.
//!
//! Usage:
//!   setfield_dump parse "<value>-><field>" ...   encode text actions, print hex + canonical text
//!   setfield_dump decode <hex bytes>             decode wire records, print text form

use setfield::{decode_action_list, SetFieldAction, StandardRegistry};

fn hex_string(bytes: &[u8]) -> String {
    bytes
        .iter()
        .map(|b| format!("{:02x}", b))
        .collect::<Vec<_>>()
        .join(" ")
}

/// Accepts hex with optional whitespace or `:` separators.
fn parse_hex(s: &str) -> anyhow::Result<Vec<u8>> {
    let cleaned: String = s.chars().filter(|c| !c.is_whitespace() && *c != ':').collect();
    anyhow::ensure!(cleaned.len() % 2 == 0, "odd number of hex digits");
    (0..cleaned.len())
        .step_by(2)
        .map(|i| {
            u8::from_str_radix(&cleaned[i..i + 2], 16)
                .map_err(|_| anyhow::anyhow!("bad hex digit at offset {}", i))
        })
        .collect()
}

fn main() -> anyhow::Result<()> {
    let args: Vec<String> = std::env::args().skip(1).collect();
    let registry = StandardRegistry;
    match args.split_first() {
        Some((cmd, rest)) if cmd == "parse" && !rest.is_empty() => {
            for text in rest {
                let action = SetFieldAction::from_text(text, &registry)?;
                println!(
                    "{}  {}",
                    hex_string(&action.to_wire()),
                    action.to_text(&registry)
                );
            }
        }
        Some((cmd, rest)) if cmd == "decode" && !rest.is_empty() => {
            let bytes = parse_hex(&rest.join(""))?;
            let decoded = decode_action_list(&bytes, &registry)?;
            for action in &decoded.actions {
                println!("{}", action.to_text(&registry));
            }
            for r in &decoded.rejected {
                eprintln!(
                    "record at bytes {}..{} rejected: {}",
                    r.byte_range.0, r.byte_range.1, r.reason
                );
            }
            if !decoded.rejected.is_empty() {
                std::process::exit(1);
            }
        }
        _ => {
            eprintln!("usage: setfield_dump parse \"<value>-><field>\" ...");
            eprintln!("       setfield_dump decode <hex bytes>");
            std::process::exit(2);
        }
    }
    Ok(())
}
