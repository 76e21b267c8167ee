//! Plumbing shared by the command line tools: argument parsing, stdin line loops and a stderr logger.
pub mod logger;

pub use linereader;

/// Looks up `--name value` in an argument list. `name` may use underscores, they are matched as dashes.
pub fn flag_value<'a>(args: &'a [String], name: &str) -> Option<&'a str> {
    let flag = format!("--{}", name.replace('_', "-"));
    args.iter()
        .position(|a| *a == flag)
        .and_then(|i| args.get(i + 1))
        .map(|s| s.as_str())
}

pub fn flag_present(args: &[String], name: &str) -> bool {
    let flag = format!("--{}", name.replace('_', "-"));
    args.iter().any(|a| *a == flag)
}

/// Prints `--name: message` and exits with status 1.
pub fn bail(name: &str, message: &str) -> ! {
    eprintln!("--{}: {}", name.replace('_', "-"), message);
    std::process::exit(1)
}

#[doc(hidden)]
#[macro_export]
macro_rules! __arg {
    ($args:ident, $name:ident) => {
        $crate::flag_present(&$args, stringify!($name))
    };
    ($args:ident, $name:ident : $ty:ty) => {
        match $crate::flag_value(&$args, stringify!($name)) {
            Some(raw) => $crate::__arg!(@parse $name, $ty, raw),
            None => $crate::bail(stringify!($name), "is required"),
        }
    };
    ($args:ident, $name:ident : $ty:ty = $default:expr) => {
        match $crate::flag_value(&$args, stringify!($name)) {
            Some(raw) => $crate::__arg!(@parse $name, $ty, raw),
            None => $default,
        }
    };
    (@parse $name:ident, $ty:ty, $raw:ident) => {
        $raw.parse::<$ty>().unwrap_or_else(|_| {
            $crate::bail(stringify!($name), &format!("can't parse {}", $raw))
        })
    };
}

/// Declares a tool's arguments and runs its body with them bound as locals.
///
/// An argument without a default is required; `? condition => "message"` after one rejects
/// the value when the condition holds.
///
/// ```ignore
/// tool! {
///     args:
///         - dict: String;
///             ? !std::path::Path::new(&dict).exists()
///             => "no such file"
///         - pos: String = "n".to_string();
///         - verbose;
///     ;
///     body: || {
///         println!("{} {} {}", dict, pos, verbose);
///     }
/// }
/// ```
#[macro_export]
macro_rules! tool {
    (
        @from $source:expr;
        args:
            $(- $name:ident $(: $ty:ty $(= $default:expr)?)? ; $(? $cond:expr => $msg:literal)?)*
        ;
        body: || $body:block
    ) => {{
        let __args: Vec<String> = $source;
        if $crate::flag_present(&__args, "help") {
            $(eprintln!("  --{}", stringify!($name).replace('_', "-"));)*
            std::process::exit(0);
        }
        $(
            let $name = $crate::__arg!(__args, $name $(: $ty $(= $default)?)?);
            $(if $cond {
                $crate::bail(stringify!($name), $msg);
            })?
        )*
        $body
    }};
    (
        args:
            $(- $name:ident $(: $ty:ty $(= $default:expr)?)? ; $(? $cond:expr => $msg:literal)?)*
        ;
        body: || $body:block
    ) => {
        $crate::tool! {
            @from std::env::args().collect();
            args: $(- $name $(: $ty $(= $default)?)? ; $(? $cond => $msg)?)* ;
            body: || $body
        }
    };
}

/// Feeds stdin to a closure one line at a time (newline stripped) with a buffered stdout writer in scope.
#[macro_export]
macro_rules! readin {
    ($wtr:ident, $handler:expr) => {{
        #[allow(unused_imports)]
        use std::io::Write;
        let stdin = std::io::stdin();
        let stdout = std::io::stdout();
        let mut $wtr = std::io::BufWriter::new(stdout.lock());
        let mut reader = $crate::linereader::LineReader::new(stdin.lock());
        {
            let mut handler = $handler;
            while let Some(line) = reader.next_line() {
                let line = line.expect("Unable to read stdin");
                let line = line.strip_suffix(b"\n").unwrap_or(line);
                let line = line.strip_suffix(b"\r").unwrap_or(line);
                handler(line);
            }
        }
        $wtr.flush().expect("Unable to flush stdout");
    }};
}

#[test]
fn finds_flag_values() {
    let args: Vec<String> = ["g2pc", "--dict", "cedict.u8", "--features", "--default-pos", "v"]
        .iter()
        .map(|s| s.to_string())
        .collect();
    assert_eq!(flag_value(&args, "dict"), Some("cedict.u8"));
    assert_eq!(flag_value(&args, "default_pos"), Some("v"));
    assert_eq!(flag_value(&args, "missing"), None);
    assert!(flag_present(&args, "features"));
    assert!(!flag_present(&args, "verbose"));
}

#[test]
fn trailing_flag_has_no_value() {
    let args: Vec<String> = vec!["g2pc".to_string(), "--dict".to_string()];
    assert_eq!(flag_value(&args, "dict"), None);
    assert!(flag_present(&args, "dict"));
}

#[test]
fn tool_binds_required_defaulted_and_switch_args() {
    let argv = ["g2pc", "--dict", "cedict.u8", "--limit", "4", "--verbose"];
    tool! {
        @from argv.iter().map(|s| s.to_string()).collect();
        args:
            - dict: String;
                ? dict.is_empty()
                => "can't be empty"
            - limit: usize = 1;
            - pos: String = "n".to_string();
            - verbose;
            - quiet;
        ;
        body: || {
            assert_eq!(dict, "cedict.u8");
            assert_eq!(limit, 4);
            assert_eq!(pos, "n");
            assert!(verbose);
            assert!(!quiet);
        }
    }
}
