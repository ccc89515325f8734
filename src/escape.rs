use std::{
    error::Error,
    fmt::{self, Display, Formatter},
    io::{self, Write},
    str::FromStr,
};

// 1 for characters which can appear literally in POSIX shell words.
#[rustfmt::skip]
const SHELL_VALID: [u8; 0x80] = [
    // 00-1f: control characters
    0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0,
    0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0,
    // ' ' !  "  #  $  %  &  '  (  )  *  +  ,  -  .  /
    0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 1, 1, 1, 1, 1,
    // 0  1  2  3  4  5  6  7  8  9  :  ;  <  =  >  ?
    1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 0, 0, 1, 0, 0,
    // @  A  B  C  D  E  F  G  H  I  J  K  L  M  N  O
    1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1,
    // P  Q  R  S  T  U  V  W  X  Y  Z  [  \  ]  ^  _
    1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 0, 0, 0, 0, 1,
    // `  a  b  c  d  e  f  g  h  i  j  k  l  m  n  o
    0, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1,
    // p  q  r  s  t  u  v  w  x  y  z  {  |  }  ~  DEL
    1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 0, 0, 0, 0, 0,
];

/// A target language of escaping.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub enum EscapingMode {
    /// No escaping
    #[default]
    None,
    /// Ninja string literals
    Ninja,
    /// Ninja string literals of shell commands
    NinjaCommand,
    /// Ninja string literals of commands already formatted for a shell
    NinjaPreformattedCommand,
}

impl FromStr for EscapingMode {
    type Err = EscapeError;

    fn from_str(name: &str) -> Result<Self, Self::Err> {
        Ok(match name {
            "none" => Self::None,
            "ninja" => Self::Ninja,
            "ninja_command" => Self::NinjaCommand,
            "ninja_preformatted_command" => Self::NinjaPreformattedCommand,
            _ => return Err(EscapeError::UnknownMode(name.into())),
        })
    }
}

#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub enum EscapingPlatform {
    /// A platform the program is running on
    #[default]
    Current,
    Posix,
    Windows,
}

impl EscapingPlatform {
    fn resolve(self) -> Self {
        match self {
            Self::Current if cfg!(windows) => Self::Windows,
            Self::Current => Self::Posix,
            platform => platform,
        }
    }
}

impl FromStr for EscapingPlatform {
    type Err = EscapeError;

    fn from_str(name: &str) -> Result<Self, Self::Err> {
        Ok(match name {
            "current" => Self::Current,
            "posix" => Self::Posix,
            "windows" | "win" => Self::Windows,
            _ => return Err(EscapeError::UnknownPlatform(name.into())),
        })
    }
}

#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct EscapeOptions {
    pub mode: EscapingMode,
    pub platform: EscapingPlatform,
    /// Suppresses surrounding quotes on Windows so that the caller can
    /// concatenate escaped strings into a single quoted argument.
    pub inhibit_quoting: bool,
}

impl EscapeOptions {
    pub fn new(mode: EscapingMode) -> Self {
        Self {
            mode,
            ..Default::default()
        }
    }
}

#[derive(Clone, Debug, Eq, PartialEq)]
pub enum EscapeError {
    UnknownMode(String),
    UnknownPlatform(String),
}

impl Error for EscapeError {}

impl Display for EscapeError {
    fn fmt(&self, formatter: &mut Formatter) -> fmt::Result {
        match self {
            Self::UnknownMode(name) => write!(formatter, "unknown escaping mode \"{name}\""),
            Self::UnknownPlatform(name) => {
                write!(formatter, "unknown escaping platform \"{name}\"")
            }
        }
    }
}

pub fn escape(string: &str, options: &EscapeOptions) -> String {
    escape_with_quoting(string, options).0
}

/// Escapes a string and returns whether it had to be quoted.
pub fn escape_with_quoting(string: &str, options: &EscapeOptions) -> (String, bool) {
    let mut escaped = String::with_capacity(string.len() * 3);
    let quoted = escape_to_string(&mut escaped, string, options);

    (escaped, quoted)
}

pub fn escape_to_stream(
    writer: &mut impl Write,
    string: &str,
    options: &EscapeOptions,
) -> io::Result<()> {
    writer.write_all(escape(string, options).as_bytes())
}

fn escape_to_string(buffer: &mut String, string: &str, options: &EscapeOptions) -> bool {
    match options.mode {
        EscapingMode::None => buffer.push_str(string),
        EscapingMode::Ninja => escape_ninja(buffer, string),
        EscapingMode::NinjaCommand => match options.platform.resolve() {
            EscapingPlatform::Windows => {
                return escape_windows_command(buffer, string, options.inhibit_quoting);
            }
            EscapingPlatform::Posix | EscapingPlatform::Current => {
                escape_posix_command(buffer, string)
            }
        },
        EscapingMode::NinjaPreformattedCommand => {
            for character in string.chars() {
                if character == '$' {
                    buffer.push('$');
                }

                buffer.push(character);
            }
        }
    }

    false
}

// Colons are always escaped in case strings are on the left-hand side of
// rules.
fn is_ninja_special(character: char) -> bool {
    matches!(character, '$' | ' ' | ':')
}

fn is_shell_valid(character: char) -> bool {
    character.is_ascii() && SHELL_VALID[character as usize] == 1
}

fn escape_ninja(buffer: &mut String, string: &str) {
    for character in string.chars() {
        escape_ninja_character(buffer, character);
    }
}

fn escape_ninja_character(buffer: &mut String, character: char) {
    if is_ninja_special(character) {
        buffer.push('$');
    }

    buffer.push(character);
}

fn escape_posix_command(buffer: &mut String, string: &str) {
    for character in string.chars() {
        match character {
            '$' | ' ' => {
                buffer.push('\\');
                buffer.push('$');
                buffer.push(character);
            }
            ':' => buffer.push_str("$:"),
            _ if !is_shell_valid(character) => {
                buffer.push('\\');
                buffer.push(character);
            }
            _ => buffer.push(character),
        }
    }
}

// Quotes arguments for `CommandLineToArgvW`.
fn escape_windows_command(buffer: &mut String, string: &str, inhibit_quoting: bool) -> bool {
    debug_assert!(!string.contains(['\r', '\n', '\u{b}', '\t']));

    if !string.contains([' ', '"']) {
        escape_ninja(buffer, string);

        return false;
    }

    if !inhibit_quoting {
        buffer.push('"');
    }

    let mut characters = string.chars().peekable();

    loop {
        let mut backslash_count = 0;

        while characters.next_if_eq(&'\\').is_some() {
            backslash_count += 1;
        }

        match characters.next() {
            None => {
                // Backslashes are followed by a closing quote.
                push_backslashes(buffer, backslash_count * 2);
                break;
            }
            Some('"') => {
                push_backslashes(buffer, backslash_count * 2 + 1);
                buffer.push('"');
            }
            Some(character) => {
                push_backslashes(buffer, backslash_count);
                escape_ninja_character(buffer, character);
            }
        }
    }

    if !inhibit_quoting {
        buffer.push('"');
    }

    true
}

fn push_backslashes(buffer: &mut String, count: usize) {
    buffer.extend(std::iter::repeat_n('\\', count));
}
