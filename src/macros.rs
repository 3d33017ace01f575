//! # Crate macros
//!
//! The `dispatcher!` macro is where every command is wired to its handler;
//! the smaller macros cut the boilerplate of turning native values into
//! reply values.

/// Defines the command table.
///
/// Commands are declared in groups; each entry names the handler function
/// and the command's arity (exact argument count, command name included).
/// The macro generates one module per command, the [`ExecutableCommand`]
/// trait, and a `Dispatcher` enum that resolves a name to its command and
/// checks the arity in one step.
///
/// Command names are matched byte-for-byte, so the wire spelling is
/// case-sensitive.
#[macro_export]
macro_rules! dispatcher {
    {
        $($group:ident {
            $($command:ident {
                $handler:expr,
                $arity:expr,
            }),+$(,)?
        }),+$(,)?
    } => {
        $($(
            #[doc = concat!("The `", stringify!($command), "` command.")]
            #[allow(non_snake_case, non_camel_case_types)]
            pub mod $command {
                use super::*;

                /// Command definition
                pub struct Command {
                    arity: usize,
                }

                impl Command {
                    /// Creates a new command definition
                    pub fn new() -> Self {
                        Self { arity: $arity }
                    }
                }

                impl ExecutableCommand for Command {
                    fn execute<'conn>(
                        &self,
                        conn: &'conn Connection,
                        args: VecDeque<Bytes>,
                    ) -> BoxFuture<'conn, Result<Value, Error>> {
                        Box::pin($handler(conn, args))
                    }

                    fn check_number_args(&self, n: usize) -> bool {
                        n == self.arity
                    }

                    fn name(&self) -> &'static str {
                        stringify!($command)
                    }

                    fn group(&self) -> &'static str {
                        stringify!($group)
                    }
                }
            }
        )+)+

        /// A command that can be executed against a connection
        pub trait ExecutableCommand {
            /// Runs the command handler with the arguments that followed the
            /// command name
            fn execute<'conn>(
                &self,
                conn: &'conn Connection,
                args: VecDeque<Bytes>,
            ) -> BoxFuture<'conn, Result<Value, Error>>;

            /// Checks whether `n` arguments (command name included) matches
            /// this command's exact arity
            fn check_number_args(&self, n: usize) -> bool;

            /// Command name as spelled on the wire
            fn name(&self) -> &'static str;

            /// Command group
            fn group(&self) -> &'static str;
        }

        /// A resolved command, ready to execute
        #[allow(non_snake_case, non_camel_case_types)]
        pub enum Dispatcher {
            $($(
                #[doc = concat!("The `", stringify!($command), "` command.")]
                $command($command::Command),
            )+)+
        }

        impl Dispatcher {
            /// Resolves the command named by the first argument and checks
            /// the arity of the full argument list
            pub fn new(args: &VecDeque<Bytes>) -> Result<Self, Error> {
                let name = args.get(0).ok_or(Error::EmptyCommand)?;

                let command = match &name[..] {
                    $($(
                        cmd if cmd == stringify!($command).as_bytes() => {
                            Ok(Self::$command($command::Command::new()))
                        }
                    )+)+
                    _ => Err(Error::CommandNotFound(
                        String::from_utf8_lossy(name).to_string(),
                    )),
                }?;

                if !command.check_number_args(args.len()) {
                    Err(Error::InvalidArgsCount(command.name().to_owned()))
                } else {
                    Ok(command)
                }
            }
        }

        impl Deref for Dispatcher {
            type Target = dyn ExecutableCommand + Sync + Send;

            fn deref(&self) -> &(dyn ExecutableCommand + Sync + Send + 'static) {
                match self {
                    $($(
                        Self::$command(v) => v as &(dyn ExecutableCommand + Sync + Send),
                    )+)+
                }
            }
        }
    }
}

/// Implements `From<$type> for Value` through the given variant constructor.
#[macro_export]
macro_rules! value_try_from {
    {$type: ty, $value: expr} => {
        impl From<$type> for Value {
            fn from(value: $type) -> Value {
                $value(value.into())
            }
        }
    }
}

/// Turns an `Option` into a reply value, mapping `None` to nil.
#[macro_export]
macro_rules! option {
    {$type: expr} => {
        if let Some(val) = $type {
            val.into()
        } else {
            Value::Null
        }
    }
}
