//! Grammar and input loading shared by all commands.

use std::fs;
use std::io::{self, Read};
use std::path::{Path, PathBuf};

use glex_core::{Grammar, GrammarError};
use glex_vm::{Graph, GraphError};

#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    #[error("grammar is required: use positional argument or -l/--lang")]
    MissingGrammar,
    #[error("use either a grammar file or -l/--lang, not both")]
    GrammarTwice,
    #[error("input is required: use positional argument or -s/--source")]
    MissingInput,
    #[error("grammar and input cannot both be from stdin")]
    BothStdin,
    #[error("unknown language '{0}' (run 'glex langs' for the full list)")]
    UnknownLang(String),
    #[error("failed to read '{}': {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("failed to read stdin: {0}")]
    Stdin(#[source] io::Error),
    #[error("invalid grammar '{label}': {source}")]
    Grammar {
        label: String,
        #[source]
        source: GrammarError,
    },
    #[error(transparent)]
    Graph(#[from] GraphError),
}

/// A grammar together with where it came from, for messages.
pub struct LoadedGrammar {
    pub label: String,
    pub grammar: Grammar,
}

impl LoadedGrammar {
    pub fn build_graph(&self) -> Result<Graph, LoadError> {
        Ok(Graph::build(&self.grammar)?)
    }
}

/// Load a grammar from a file, stdin (`-`) or the bundled set.
pub fn load_grammar(
    grammar_path: Option<&Path>,
    lang: Option<&str>,
) -> Result<LoadedGrammar, LoadError> {
    match (grammar_path, lang) {
        (Some(_), Some(_)) => Err(LoadError::GrammarTwice),
        (None, Some(name)) => {
            let lang =
                glex_langs::from_name(name).ok_or_else(|| LoadError::UnknownLang(name.to_owned()))?;
            Ok(LoadedGrammar {
                label: lang.name().to_owned(),
                grammar: lang.grammar().clone(),
            })
        }
        (Some(path), None) => {
            let (label, bytes) = if path.as_os_str() == "-" {
                ("<stdin>".to_owned(), read_stdin()?)
            } else {
                let bytes = fs::read(path).map_err(|source| LoadError::Read {
                    path: path.to_owned(),
                    source,
                })?;
                (path.display().to_string(), bytes)
            };
            let grammar = decode(path, &bytes).map_err(|source| LoadError::Grammar {
                label: label.clone(),
                source,
            })?;
            Ok(LoadedGrammar { label, grammar })
        }
        (None, None) => Err(LoadError::MissingGrammar),
    }
}

/// JSON by extension or by a leading `{`, postcard otherwise.
fn decode(path: &Path, bytes: &[u8]) -> Result<Grammar, GrammarError> {
    let is_json = path.extension().is_some_and(|ext| ext == "json")
        || bytes
            .iter()
            .find(|b| !b.is_ascii_whitespace())
            .is_some_and(|&b| b == b'{');

    if is_json {
        let text = String::from_utf8_lossy(bytes);
        Grammar::from_json(&text)
    } else {
        Grammar::from_binary(bytes)
    }
}

/// Load input from inline text, a file, or stdin (`-`).
pub fn load_input(
    input_text: Option<&str>,
    input_path: Option<&Path>,
    grammar_path: Option<&Path>,
) -> Result<String, LoadError> {
    if let Some(text) = input_text {
        return Ok(text.to_owned());
    }
    let Some(path) = input_path else {
        return Err(LoadError::MissingInput);
    };
    if path.as_os_str() == "-" {
        if grammar_path.is_some_and(|p| p.as_os_str() == "-") {
            return Err(LoadError::BothStdin);
        }
        let bytes = read_stdin()?;
        return Ok(String::from_utf8_lossy(&bytes).into_owned());
    }
    fs::read_to_string(path).map_err(|source| LoadError::Read {
        path: path.to_owned(),
        source,
    })
}

fn read_stdin() -> Result<Vec<u8>, LoadError> {
    let mut buf = Vec::new();
    io::stdin()
        .read_to_end(&mut buf)
        .map_err(LoadError::Stdin)?;
    Ok(buf)
}

/// Print an error and exit with the usage/load status.
pub fn fail(err: impl std::fmt::Display) -> ! {
    eprintln!("error: {}", err);
    std::process::exit(2)
}
