//! Gate-level netlists and the line-oriented parser.
//!
//! The recognized input is a trivial Verilog-like subset, one construct per
//! line: `input`/`output`/`wire`/`reg` declaration lists, gate
//! instantiations of the form `kind label(output, input, …);`, and
//! end-of-line `//` comments. Parsing is best-effort: lines that fit no
//! recognized construct are skipped, and reading stops at `endmodule`.

use std::io::{self, BufRead};

/// Kinds of recognized gates, matched case-insensitively.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum GateKind {
    And,
    Or,
    Xor,
    Nand,
    Nor,
    Not,
}

impl GateKind {
    pub fn parse(token: &str) -> Option<GateKind> {
        let kind = match token.to_ascii_lowercase().as_str() {
            "and" => GateKind::And,
            "or" => GateKind::Or,
            "xor" => GateKind::Xor,
            "nand" => GateKind::Nand,
            "nor" => GateKind::Nor,
            "not" => GateKind::Not,
            _ => return None,
        };
        Some(kind)
    }
}

/// One gate instantiation.
///
/// The first token inside the parentheses names the output signal; the
/// label between the kind and the parenthesis is an instance label and is
/// discarded. `kind` is `None` for instantiations whose kind token is not
/// recognized; such gates evaluate to the zero diagram.
#[derive(Debug, Clone)]
pub struct Gate {
    pub kind: Option<GateKind>,
    pub output: String,
    pub inputs: Vec<String>,
}

/// A parsed netlist.
///
/// `inputs` keeps declaration order, which defines the initial variable
/// order. `wires` and `regs` are informational only.
#[derive(Debug, Clone, Default)]
pub struct Netlist {
    pub inputs: Vec<String>,
    pub outputs: Vec<String>,
    pub wires: Vec<String>,
    pub regs: Vec<String>,
    pub gates: Vec<Gate>,
}

impl Netlist {
    /// Parses a netlist from text, stopping at `endmodule`.
    pub fn parse(text: &str) -> Netlist {
        let mut netlist = Netlist::default();
        for raw in text.lines() {
            if !netlist.take_line(raw) {
                break;
            }
        }
        netlist
    }

    /// Reads and parses a netlist line by line, stopping at `endmodule` or
    /// end of input.
    pub fn from_reader(reader: impl BufRead) -> io::Result<Netlist> {
        let mut netlist = Netlist::default();
        for raw in reader.lines() {
            if !netlist.take_line(&raw?) {
                break;
            }
        }
        Ok(netlist)
    }

    /// Consumes one raw line; returns `false` once `endmodule` is seen.
    fn take_line(&mut self, raw: &str) -> bool {
        let line = strip_comment(raw).trim();
        if line.is_empty() {
            return true;
        }
        if line.contains("endmodule") {
            return false;
        }

        if let Some(rest) = line.strip_prefix("input") {
            self.inputs.extend(parse_decl_list(rest));
        } else if let Some(rest) = line.strip_prefix("output") {
            self.outputs.extend(parse_decl_list(rest));
        } else if let Some(rest) = line.strip_prefix("wire") {
            self.wires.extend(parse_decl_list(rest));
        } else if let Some(rest) = line.strip_prefix("reg") {
            self.regs.extend(parse_decl_list(rest));
        } else if line.contains('(') && line.contains(')') {
            if let Some(gate) = parse_gate(line) {
                self.gates.push(gate);
            }
        }
        true
    }
}

fn strip_comment(line: &str) -> &str {
    match line.find("//") {
        Some(position) => &line[..position],
        None => line,
    }
}

fn parse_decl_list(rest: &str) -> Vec<String> {
    rest.replace(';', "")
        .split(',')
        .map(str::trim)
        .filter(|name| !name.is_empty())
        .map(String::from)
        .collect()
}

fn parse_gate(line: &str) -> Option<Gate> {
    let open = line.find('(')?;
    let close = line.rfind(')')?;
    if close < open {
        return None;
    }

    let kind_token = line[..open].split_whitespace().next()?;
    let kind = GateKind::parse(kind_token);

    let mut signals = line[open + 1..close]
        .split(',')
        .map(str::trim)
        .filter(|name| !name.is_empty())
        .map(String::from);
    let output = signals.next()?;

    Some(Gate {
        kind,
        output,
        inputs: signals.collect(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_declarations() {
        let netlist = Netlist::parse(
            "input a, b, c;\n\
             output y;\n\
             wire t1, t2;\n\
             reg q;\n\
             endmodule\n",
        );
        assert_eq!(netlist.inputs, ["a", "b", "c"]);
        assert_eq!(netlist.outputs, ["y"]);
        assert_eq!(netlist.wires, ["t1", "t2"]);
        assert_eq!(netlist.regs, ["q"]);
        assert!(netlist.gates.is_empty());
    }

    #[test]
    fn test_parse_gate_line() {
        let netlist = Netlist::parse("and g1(y, a, b);\nendmodule\n");
        assert_eq!(netlist.gates.len(), 1);
        let gate = &netlist.gates[0];
        assert_eq!(gate.kind, Some(GateKind::And));
        assert_eq!(gate.output, "y");
        assert_eq!(gate.inputs, ["a", "b"]);
    }

    #[test]
    fn test_gate_kinds_case_insensitive() {
        for (token, kind) in [
            ("AND", GateKind::And),
            ("Or", GateKind::Or),
            ("XOR", GateKind::Xor),
            ("nand", GateKind::Nand),
            ("NOR", GateKind::Nor),
            ("Not", GateKind::Not),
        ] {
            assert_eq!(GateKind::parse(token), Some(kind));
        }
        assert_eq!(GateKind::parse("buf"), None);
    }

    #[test]
    fn test_unknown_kind_is_kept() {
        let netlist = Netlist::parse("buf g1(y, a);\nendmodule\n");
        assert_eq!(netlist.gates.len(), 1);
        assert_eq!(netlist.gates[0].kind, None);
        assert_eq!(netlist.gates[0].output, "y");
    }

    #[test]
    fn test_comments_stripped() {
        let netlist = Netlist::parse(
            "// a full-line comment\n\
             input a; // trailing comment\n\
             and g1(y, a, a); // another\n\
             endmodule\n",
        );
        assert_eq!(netlist.inputs, ["a"]);
        assert_eq!(netlist.gates.len(), 1);
    }

    #[test]
    fn test_endmodule_stops_parsing() {
        let netlist = Netlist::parse(
            "input a;\n\
             endmodule\n\
             input zzz;\n",
        );
        assert_eq!(netlist.inputs, ["a"]);
    }

    #[test]
    fn test_malformed_lines_skipped() {
        let netlist = Netlist::parse(
            "input a;\n\
             and g1(y, a, a;\n\
             garbage here\n\
             and ();\n\
             endmodule\n",
        );
        assert_eq!(netlist.inputs, ["a"]);
        assert!(netlist.gates.is_empty());
    }

    #[test]
    fn test_from_reader() {
        let text = "input a;\noutput y;\nnot g1(y, a);\nendmodule\n";
        let netlist = Netlist::from_reader(text.as_bytes()).unwrap();
        assert_eq!(netlist.inputs, ["a"]);
        assert_eq!(netlist.gates.len(), 1);
        assert_eq!(netlist.gates[0].kind, Some(GateKind::Not));
    }
}
