use std::fs::File;
use std::io::{self, BufRead, BufReader};

use tracing_subscriber::EnvFilter;

use crate::errors::{AnnotationError, Result};

// remove one trailing line terminator: "\n", "\r\n" or "\r"
pub fn chomp(line: &str) -> &str {
    line.strip_suffix("\r\n")
        .or_else(|| line.strip_suffix('\n'))
        .or_else(|| line.strip_suffix('\r'))
        .unwrap_or(line)
}

/// Call `f` with each line of `reader`, without its terminator.  Bytes that
/// aren't valid UTF-8 (eg. Latin-1 in GFF product notes) are replaced with
/// U+FFFD rather than ending the read.
pub fn for_each_line<R, F>(mut reader: R, mut f: F) -> Result<()>
    where R: BufRead,
          F: FnMut(&str)
{
    let mut buf = vec![];

    loop {
        buf.clear();
        if reader.read_until(b'\n', &mut buf)? == 0 {
            break;
        }
        let line = String::from_utf8_lossy(&buf);
        f(chomp(&line));
    }

    Ok(())
}

pub fn open_input(file_name: &str) -> Result<BufReader<File>> {
    match File::open(file_name) {
        Ok(file) => Ok(BufReader::new(file)),
        Err(source) => Err(AnnotationError::InputUnavailable {
            path: file_name.to_owned(),
            source,
        }),
    }
}

/// Open each of the files in turn, or standard input when there are none.
/// Each file is opened just before it's needed so an unreadable file is
/// only reported when reached.
pub fn for_each_input<F>(file_names: &[String], mut f: F) -> Result<()>
    where F: FnMut(&mut dyn BufRead) -> Result<()>
{
    if file_names.is_empty() {
        let stdin = io::stdin();
        let mut stdin_lock = stdin.lock();
        return f(&mut stdin_lock);
    }

    for file_name in file_names {
        tracing::debug!("reading {}", file_name);
        let mut reader = open_input(file_name)?;
        f(&mut reader)?;
    }

    Ok(())
}

// logs go to stderr so that the reports on stdout stay clean
pub fn init_logging(bin_name: &str, verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let default_filter = format!("keggannot={},{}={}", default_level,
                                 bin_name.replace('-', "_"), default_level);

    tracing_subscriber::fmt()
        .with_writer(io::stderr)
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .or_else(|_| EnvFilter::try_new(&default_filter))
                .unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .init();
}

#[test]
fn test_chomp() {
    assert_eq!(chomp("ec:1.1.1.1\n"), "ec:1.1.1.1");
    assert_eq!(chomp("ec:1.1.1.1\r\n"), "ec:1.1.1.1");
    assert_eq!(chomp("ec:1.1.1.1\r"), "ec:1.1.1.1");
    assert_eq!(chomp("ec:1.1.1.1\n\n"), "ec:1.1.1.1\n");
    assert_eq!(chomp(""), "");
}

#[test]
fn test_open_input_missing() {
    match open_input("/nonexistent/enzymes.txt") {
        Err(AnnotationError::InputUnavailable { path, .. }) =>
            assert_eq!(path, "/nonexistent/enzymes.txt"),
        other => panic!("unexpected result: {:?}", other.map(|_| ())),
    }
}

#[test]
fn test_for_each_line_invalid_utf8() {
    let input: &[u8] = b"EC 1.1.1.1\nproduct=caf\xe9 oxidase\r\nlast line";
    let mut lines = vec![];
    for_each_line(input, |line| lines.push(line.to_owned())).unwrap();
    assert_eq!(lines, vec!["EC 1.1.1.1", "product=caf\u{FFFD} oxidase", "last line"]);
}
