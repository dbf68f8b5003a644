// Invocation - A command line resolved against the tree, ready for dispatch
//
// Resolution stops at the handoff: it finds the leaf command and binds typed
// argument values (filling defaults). Executing side effects is the job of the
// application's Executor.

use crate::command::args::{ArgKind, ArgValue, ArgumentSpec};
use crate::command::error::{ResolveError, ResolveResult};
use crate::command::tokenizer::tokenize;
use crate::command::tree::{Arity, Command, CommandTree, MatchResult};

/// A resolved command with bound arguments
#[derive(Debug, Clone)]
pub struct Invocation<'t> {
    /// Names from the root down to the command, e.g. `["set", "tempo"]`
    pub path: Vec<&'t str>,
    pub command: &'t Command,
    /// One value per argument spec, in order
    pub args: Vec<ArgValue>,
}

impl<'t> Invocation<'t> {
    /// Space-joined path, e.g. `set tempo`
    pub fn id(&self) -> String {
        self.path.join(" ")
    }

    /// Value of the named argument
    pub fn arg(&self, name: &str) -> Option<&ArgValue> {
        self.command
            .args()
            .iter()
            .position(|spec| spec.name == name)
            .and_then(|index| self.args.get(index))
    }
}

fn expected_description(kind: &ArgKind) -> String {
    match kind {
        ArgKind::Enum(options) => format!("one of {}", options.join(", ")),
        other => other.type_name().to_string(),
    }
}

fn bind(spec: &ArgumentSpec, raw: &str) -> ResolveResult<ArgValue> {
    spec.kind
        .parse(raw)
        .ok_or_else(|| ResolveError::InvalidArgument {
            argument: spec.name.clone(),
            expected: expected_description(&spec.kind),
            value: raw.to_string(),
        })
}

impl CommandTree {
    /// Resolve a single command line into an invocation
    pub fn resolve(&self, line: &str) -> ResolveResult<Invocation<'_>> {
        let tokens = tokenize(line);
        if tokens.is_empty() {
            return Err(ResolveError::Empty);
        }

        match self.lookup(&tokens) {
            MatchResult::Group { path, .. } => Err(ResolveError::Incomplete {
                path: path.join(" "),
            }),
            MatchResult::Unmatched { token, .. } => Err(ResolveError::NotFound {
                token: token.to_string(),
            }),
            MatchResult::Command {
                command,
                path,
                args,
                arity,
            } => {
                let specs = command.args();
                match arity {
                    Arity::TooMany(_) => {
                        return Err(ResolveError::TooManyArguments {
                            command: path.join(" "),
                            expected: specs.len(),
                            given: args.len(),
                        });
                    }
                    Arity::Missing(_) => {
                        return Err(ResolveError::MissingArgument {
                            command: path.join(" "),
                            argument: specs[args.len()].name.clone(),
                        });
                    }
                    Arity::Complete => {}
                }

                let mut values = Vec::with_capacity(specs.len());
                for (index, spec) in specs.iter().enumerate() {
                    let raw = args.get(index).or(spec.default.as_ref()).ok_or_else(|| {
                        ResolveError::MissingArgument {
                            command: path.join(" "),
                            argument: spec.name.clone(),
                        }
                    })?;
                    values.push(bind(spec, raw)?);
                }

                Ok(Invocation {
                    path,
                    command,
                    args: values,
                })
            }
        }
    }
}
