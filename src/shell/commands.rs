//! Built-in command table

use thiserror::Error;

use super::{Clock, OutputLine, Segment};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Befehl nicht gefunden: {0}")]
pub struct UnknownCommand(pub String);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Builtin {
    /// Empties the output
    Clear,
    /// Hands the terminal over to the wave game
    Invaders,
    /// Starts a timed run
    Speedtest,
    Help,
    Neofetch,
    Whoami,
    Ls,
    Cat,
    Chaos,
    Sudo,
    Pwd,
    Date,
}

/// Resolve a command by its first word
pub fn lookup(input: &str) -> Result<Builtin, UnknownCommand> {
    let name = input.split_whitespace().next().unwrap_or_default();
    let builtin = match name {
        "clear" => Builtin::Clear,
        "invaders" => Builtin::Invaders,
        "speedtest" => Builtin::Speedtest,
        "hilfe" | "help" => Builtin::Help,
        "neofetch" => Builtin::Neofetch,
        "whoami" => Builtin::Whoami,
        "ls" => Builtin::Ls,
        "cat" => Builtin::Cat,
        "chaos" => Builtin::Chaos,
        "sudo" => Builtin::Sudo,
        "pwd" => Builtin::Pwd,
        "date" => Builtin::Date,
        _ => return Err(UnknownCommand(input.to_string())),
    };
    Ok(builtin)
}

impl Builtin {
    /// Static output of a table command. Terminal-level commands print nothing here.
    pub fn output(self, clock: &dyn Clock) -> Vec<OutputLine> {
        match self {
            Builtin::Clear | Builtin::Invaders | Builtin::Speedtest => Vec::new(),
            Builtin::Help => help(),
            Builtin::Neofetch => neofetch(),
            Builtin::Whoami => whoami(),
            Builtin::Ls => ls(),
            Builtin::Cat => cat(),
            Builtin::Chaos => chaos(),
            Builtin::Sudo => sudo(),
            Builtin::Pwd => pwd(),
            Builtin::Date => date(clock),
        }
    }
}

fn responses(lines: &[&str]) -> Vec<OutputLine> {
    lines.iter().map(|l| OutputLine::response(*l)).collect()
}

fn help() -> Vec<OutputLine> {
    responses(&[
        "",
        "  VERFÜGBARE BEFEHLE:",
        "  ─────────────────────────────────────",
        "  neofetch    System-Info anzeigen",
        "  whoami      Kurze Bio",
        "  ls          Dateien auflisten",
        "  cat         Datei lesen",
        "  speedtest   Netzwerkgeschwindigkeit testen",
        "  invaders    Space Invaders spielen",
        "  clear       Terminal leeren",
        "  chaos       ???",
        "",
    ])
}

const LOGO: [(&str, &str); 13] = [
    ("                    .:'", "green"),
    ("                .OMMMM'", "green"),
    ("              .OMMMMMM", "green"),
    ("             OMMMMMMMMM", "yellow"),
    ("            'MMMMMMMMMML", "yellow"),
    ("            MMMMMMMMMMM.", "orange"),
    ("            MMMMMMMMMMM'", "orange"),
    ("            'MMMMMMMMMM", "red"),
    ("             MMMMMMMMM'", "red"),
    ("              'MMMMMMM", "fuchsia"),
    ("               'MMMMM'", "fuchsia"),
    ("                 MMM'", "blue"),
    ("                  V", "cyan"),
];

const INFO: [(&str, &str); 11] = [
    ("", "matthias@chaos.quest"),
    ("", "─────────────────────"),
    ("OS", "MatthiasOS (macOS-basiert)"),
    ("Host", "Deutschland"),
    ("Kernel", "Kaffee 5.15.0-generic"),
    ("Uptime", "~40 Jahre"),
    ("Shell", "zsh 5.9 + oh-my-zsh"),
    ("IDE", "VS Code / Neovim"),
    ("Terminal", "MatthiasOS Terminal"),
    ("CPU", "Brain @ ~3GHz (Kaffee-boosted)"),
    ("Memory", "16GB / 32GB (50%)"),
];

/// Logo column on the left, system info on the right
fn neofetch() -> Vec<OutputLine> {
    let mut lines = vec![OutputLine::response("")];
    for (i, (art, color)) in LOGO.iter().enumerate() {
        let mut segments = vec![Segment::new(format!("{art:<28}"), *color)];
        match INFO.get(i) {
            Some((label, value)) => {
                if !label.is_empty() {
                    segments.push(Segment::new(format!("{label}: "), "pink"));
                }
                segments.push(Segment::new(*value, "foreground"));
            }
            None => segments[0].text = art.to_string(),
        }
        lines.push(OutputLine::colored(segments));
    }
    lines.push(OutputLine::response(""));
    lines
}

fn whoami() -> Vec<OutputLine> {
    responses(&[
        "",
        "  Matthias - Software Engineer & Digital Chaos Architect",
        "  Baut Dinge die (meistens) funktionieren.",
        "",
    ])
}

fn ls() -> Vec<OutputLine> {
    responses(&[
        "  drwxr-xr-x  projekte/",
        "  drwxr-xr-x  skills/",
        "  -rw-r--r--  README.md",
        "  -rw-r--r--  .secrets (Permission denied)",
    ])
}

fn cat() -> Vec<OutputLine> {
    responses(&[
        "",
        "        /\\_/\\  ",
        "       ( o.o ) ",
        "        > ^ <  Miau!",
        "",
    ])
}

fn chaos() -> Vec<OutputLine> {
    let mut lines = vec![OutputLine::error("  ⚠ CHAOS MODUS AKTIVIERT")];
    lines.extend(responses(&[
        "",
        "  \"In einer Welt voller Bugs, sei ein Feature.\"",
        "                              - Matthias",
        "",
    ]));
    lines
}

fn sudo() -> Vec<OutputLine> {
    vec![OutputLine::error(
        "  Netter Versuch. Du bist nicht im sudoers file.",
    )]
}

fn pwd() -> Vec<OutputLine> {
    responses(&["  /home/matthias"])
}

fn date(clock: &dyn Clock) -> Vec<OutputLine> {
    vec![OutputLine::response(format!("  {}", clock.local_string()))]
}
