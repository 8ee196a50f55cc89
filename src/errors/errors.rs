use std::fmt::Display;

use thiserror::Error;

use crate::Location;

/// A located diagnostic produced by any phase of the front end.
#[derive(Debug, Clone, PartialEq)]
pub struct Error {
    internal_error: ErrorImpl,
    location: Location,
}

impl Error {
    pub fn new(error_impl: ErrorImpl, location: Location) -> Self {
        Error {
            internal_error: error_impl,
            location,
        }
    }

    pub fn get_location(&self) -> &Location {
        &self.location
    }

    pub fn get_internal(&self) -> &ErrorImpl {
        &self.internal_error
    }

    /// Human readable message, the `Display` of the inner error.
    pub fn get_message(&self) -> String {
        self.internal_error.to_string()
    }

    /// `EndOfFile` is a control signal ("nothing left to parse"), not a failure.
    pub fn is_end_of_file(&self) -> bool {
        self.code() == ErrorCode::EndOfFile
    }

    pub fn code(&self) -> ErrorCode {
        match &self.internal_error {
            ErrorImpl::LexError { .. } => ErrorCode::LexError,
            ErrorImpl::EndOfFile => ErrorCode::EndOfFile,
            ErrorImpl::MissingSemicolon { .. } => ErrorCode::MissingSemicolon,
            ErrorImpl::MissingLParen { .. } => ErrorCode::MissingLParen,
            ErrorImpl::MissingRParen { .. } => ErrorCode::MissingRParen,
            ErrorImpl::MissingLBrace { .. } => ErrorCode::MissingLBrace,
            ErrorImpl::MissingRBrace { .. } => ErrorCode::MissingRBrace,
            ErrorImpl::MissingRBracket { .. } => ErrorCode::MissingRBracket,
            ErrorImpl::MissingFn { .. } => ErrorCode::MissingFn,
            ErrorImpl::MissingFnName { .. } => ErrorCode::MissingFnName,
            ErrorImpl::MissingArgName { .. } => ErrorCode::MissingArgName,
            ErrorImpl::MissingColon { .. } => ErrorCode::MissingColon,
            ErrorImpl::MissingArgType { .. } => ErrorCode::MissingArgType,
            ErrorImpl::MissingThen { .. } => ErrorCode::MissingThen,
            ErrorImpl::MissingElse { .. } => ErrorCode::MissingElse,
            ErrorImpl::MissingDo { .. } => ErrorCode::MissingDo,
            ErrorImpl::UnknownBasicToken { .. } => ErrorCode::UnknownBasicToken,
            ErrorImpl::NameNotBoundInScope { .. } => ErrorCode::NameNotBoundInScope,
            ErrorImpl::NameAlreadyBoundInScope { .. } => ErrorCode::NameAlreadyBoundInScope,
            ErrorImpl::AssignmentTypeMismatch { .. } => ErrorCode::AssignmentTypeMismatch,
            ErrorImpl::ArgTypeMismatch { .. } => ErrorCode::ArgTypeMismatch,
            ErrorImpl::ArgNumMismatch { .. } => ErrorCode::ArgNumMismatch,
            ErrorImpl::CalleeIsNotAFunction { .. } => ErrorCode::CalleeIsNotAFunction,
            ErrorImpl::ArrayMemberTypeMismatch { .. } => ErrorCode::ArrayMemberTypeMismatch,
            ErrorImpl::DotLeftIsNotATuple { .. } => ErrorCode::DotLeftIsNotATuple,
            ErrorImpl::DotRightIsNotAnInt => ErrorCode::DotRightIsNotAnInt,
            ErrorImpl::DotIndexOutOfRange { .. } => ErrorCode::DotIndexOutOfRange,
            ErrorImpl::WhileTestTypeMismatch { .. } => ErrorCode::WhileTestTypeMismatch,
            ErrorImpl::CondTestExprTypeMismatch { .. } => ErrorCode::CondTestExprTypeMismatch,
            ErrorImpl::CondBodyExprTypeMismatch { .. } => ErrorCode::CondBodyExprTypeMismatch,
            ErrorImpl::UnknownUnop { .. } => ErrorCode::UnknownUnop,
            ErrorImpl::UnknownBinop { .. } => ErrorCode::UnknownBinop,
            ErrorImpl::UnopOperandTypeMismatch { .. } => ErrorCode::UnopOperandTypeMismatch,
            ErrorImpl::BinopOperandTypeMismatch { .. } => ErrorCode::BinopOperandTypeMismatch,
            ErrorImpl::ReturnTypeMismatch { .. } => ErrorCode::ReturnTypeMismatch,
            ErrorImpl::ConflictingOperatorGrammar { .. } => ErrorCode::ConflictingOperatorGrammar,
        }
    }

    pub fn get_error_name(&self) -> &'static str {
        self.code().name()
    }

    pub fn get_tip(&self) -> ErrorTip {
        match &self.internal_error {
            ErrorImpl::LexError { .. } | ErrorImpl::EndOfFile => ErrorTip::None,
            ErrorImpl::MissingSemicolon { found } => ErrorTip::Suggestion(format!(
                "Unexpected token: `{}`, did you miss a semicolon?",
                found
            )),
            ErrorImpl::MissingLParen { found }
            | ErrorImpl::MissingRParen { found }
            | ErrorImpl::MissingLBrace { found }
            | ErrorImpl::MissingRBrace { found }
            | ErrorImpl::MissingRBracket { found } => ErrorTip::Suggestion(format!(
                "Unexpected token: `{}`, is a delimiter unbalanced?",
                found
            )),
            ErrorImpl::MissingFn { found }
            | ErrorImpl::MissingFnName { found }
            | ErrorImpl::MissingArgName { found }
            | ErrorImpl::MissingColon { found } => ErrorTip::Suggestion(format!(
                "Unexpected token: `{}`, functions are written `fn name(arg: Type) {{ ... }}`",
                found
            )),
            ErrorImpl::MissingArgType { found } => ErrorTip::Suggestion(format!(
                "`{}` is not a type, expected `Nil`, `Bool`, `Int`, `*T`, `[T; N]`, `(T, ..)` or `fn(T, ..) -> T`",
                found
            )),
            ErrorImpl::MissingThen { .. } | ErrorImpl::MissingElse { .. } => {
                ErrorTip::Suggestion(String::from(
                    "Conditionals are written `if test then { ... } else { ... }`",
                ))
            }
            ErrorImpl::MissingDo { .. } => {
                ErrorTip::Suggestion(String::from("Loops are written `while test do { ... }`"))
            }
            ErrorImpl::UnknownBasicToken { found } => ErrorTip::Suggestion(format!(
                "`{}` cannot start an expression",
                found
            )),
            ErrorImpl::NameNotBoundInScope { name } => {
                ErrorTip::Suggestion(format!("Name `{}` not bound, bind it with `{} := ...`", name, name))
            }
            ErrorImpl::NameAlreadyBoundInScope { name } => ErrorTip::Suggestion(format!(
                "Name `{}` already bound in this scope, use `{} = ...` to assign",
                name, name
            )),
            ErrorImpl::AssignmentTypeMismatch { expected, received }
            | ErrorImpl::ArgTypeMismatch { expected, received }
            | ErrorImpl::ArrayMemberTypeMismatch { expected, received }
            | ErrorImpl::CondBodyExprTypeMismatch { expected, received }
            | ErrorImpl::ReturnTypeMismatch { expected, received } => ErrorTip::Suggestion(
                format!("Expected type `{}`, received `{}`", expected, received),
            ),
            ErrorImpl::WhileTestTypeMismatch { received }
            | ErrorImpl::CondTestExprTypeMismatch { received } => ErrorTip::Suggestion(format!(
                "Expected type `Bool`, received `{}`",
                received
            )),
            ErrorImpl::ArgNumMismatch { expected, received } => ErrorTip::Suggestion(format!(
                "Expected {} arguments, received {}",
                expected, received
            )),
            ErrorImpl::CalleeIsNotAFunction { received } => ErrorTip::Suggestion(format!(
                "Only functions can be applied, received `{}`",
                received
            )),
            ErrorImpl::DotLeftIsNotATuple { received } => ErrorTip::Suggestion(format!(
                "Only tuples can be indexed with `.`, received `{}`",
                received
            )),
            ErrorImpl::DotRightIsNotAnInt => ErrorTip::Suggestion(String::from(
                "Tuple indices must be integer literals",
            )),
            ErrorImpl::DotIndexOutOfRange { index, arity } => ErrorTip::Suggestion(format!(
                "Index {} is out of range for a tuple of {} elements",
                index, arity
            )),
            ErrorImpl::UnknownUnop { op } | ErrorImpl::UnknownBinop { op } => {
                ErrorTip::Suggestion(format!("Operator `{}` has not been registered", op))
            }
            ErrorImpl::UnopOperandTypeMismatch { op, operand } => ErrorTip::Suggestion(format!(
                "No overload of `{}` accepts `{}`",
                op, operand
            )),
            ErrorImpl::BinopOperandTypeMismatch { op, left, right } => ErrorTip::Suggestion(
                format!("No overload of `{}` accepts `{}` and `{}`", op, left, right),
            ),
            ErrorImpl::ConflictingOperatorGrammar { op, .. } => ErrorTip::Suggestion(format!(
                "Operator `{}` was already registered with a different precedence or associativity",
                op
            )),
        }
    }
}

impl Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {} at {}", self.get_error_name(), self.internal_error, self.location)
    }
}

impl std::error::Error for Error {}

pub enum ErrorTip {
    None,
    Suggestion(String),
}

impl Display for ErrorTip {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ErrorTip::None => write!(f, ""),
            ErrorTip::Suggestion(suggestion) => write!(f, "{}", suggestion),
        }
    }
}

/// Fieldless error code, stable across message wording changes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    LexError,
    EndOfFile,
    MissingSemicolon,
    MissingLParen,
    MissingRParen,
    MissingLBrace,
    MissingRBrace,
    MissingRBracket,
    MissingFn,
    MissingFnName,
    MissingArgName,
    MissingColon,
    MissingArgType,
    MissingThen,
    MissingElse,
    MissingDo,
    UnknownBasicToken,
    NameNotBoundInScope,
    NameAlreadyBoundInScope,
    AssignmentTypeMismatch,
    ArgTypeMismatch,
    ArgNumMismatch,
    CalleeIsNotAFunction,
    ArrayMemberTypeMismatch,
    DotLeftIsNotATuple,
    DotRightIsNotAnInt,
    DotIndexOutOfRange,
    WhileTestTypeMismatch,
    CondTestExprTypeMismatch,
    CondBodyExprTypeMismatch,
    UnknownUnop,
    UnknownBinop,
    UnopOperandTypeMismatch,
    BinopOperandTypeMismatch,
    ReturnTypeMismatch,
    ConflictingOperatorGrammar,
}

impl ErrorCode {
    pub fn name(&self) -> &'static str {
        match self {
            ErrorCode::LexError => "LexError",
            ErrorCode::EndOfFile => "EndOfFile",
            ErrorCode::MissingSemicolon => "MissingSemicolon",
            ErrorCode::MissingLParen => "MissingLParen",
            ErrorCode::MissingRParen => "MissingRParen",
            ErrorCode::MissingLBrace => "MissingLBrace",
            ErrorCode::MissingRBrace => "MissingRBrace",
            ErrorCode::MissingRBracket => "MissingRBracket",
            ErrorCode::MissingFn => "MissingFn",
            ErrorCode::MissingFnName => "MissingFnName",
            ErrorCode::MissingArgName => "MissingArgName",
            ErrorCode::MissingColon => "MissingColon",
            ErrorCode::MissingArgType => "MissingArgType",
            ErrorCode::MissingThen => "MissingThen",
            ErrorCode::MissingElse => "MissingElse",
            ErrorCode::MissingDo => "MissingDo",
            ErrorCode::UnknownBasicToken => "UnknownBasicToken",
            ErrorCode::NameNotBoundInScope => "NameNotBoundInScope",
            ErrorCode::NameAlreadyBoundInScope => "NameAlreadyBoundInScope",
            ErrorCode::AssignmentTypeMismatch => "AssignmentTypeMismatch",
            ErrorCode::ArgTypeMismatch => "ArgTypeMismatch",
            ErrorCode::ArgNumMismatch => "ArgNumMismatch",
            ErrorCode::CalleeIsNotAFunction => "CalleeIsNotAFunction",
            ErrorCode::ArrayMemberTypeMismatch => "ArrayMemberTypeMismatch",
            ErrorCode::DotLeftIsNotATuple => "DotLeftIsNotATuple",
            ErrorCode::DotRightIsNotAnInt => "DotRightIsNotAnInt",
            ErrorCode::DotIndexOutOfRange => "DotIndexOutOfRange",
            ErrorCode::WhileTestTypeMismatch => "WhileTestTypeMismatch",
            ErrorCode::CondTestExprTypeMismatch => "CondTestExprTypeMismatch",
            ErrorCode::CondBodyExprTypeMismatch => "CondBodyExprTypeMismatch",
            ErrorCode::UnknownUnop => "UnknownUnop",
            ErrorCode::UnknownBinop => "UnknownBinop",
            ErrorCode::UnopOperandTypeMismatch => "UnopOperandTypeMismatch",
            ErrorCode::BinopOperandTypeMismatch => "BinopOperandTypeMismatch",
            ErrorCode::ReturnTypeMismatch => "ReturnTypeMismatch",
            ErrorCode::ConflictingOperatorGrammar => "ConflictingOperatorGrammar",
        }
    }
}

impl Display for ErrorCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ErrorImpl {
    // Lexical
    #[error("unrecognised character {token:?}")]
    LexError { token: String },

    // Parsing
    #[error("end of input")]
    EndOfFile,
    #[error("expected `;`, found {found:?}")]
    MissingSemicolon { found: String },
    #[error("expected `(`, found {found:?}")]
    MissingLParen { found: String },
    #[error("expected `)`, found {found:?}")]
    MissingRParen { found: String },
    #[error("expected `{{`, found {found:?}")]
    MissingLBrace { found: String },
    #[error("expected `}}`, found {found:?}")]
    MissingRBrace { found: String },
    #[error("expected `]`, found {found:?}")]
    MissingRBracket { found: String },
    #[error("expected `fn`, found {found:?}")]
    MissingFn { found: String },
    #[error("expected a function name, found {found:?}")]
    MissingFnName { found: String },
    #[error("expected an argument name, found {found:?}")]
    MissingArgName { found: String },
    #[error("expected `:`, found {found:?}")]
    MissingColon { found: String },
    #[error("expected an argument type, found {found:?}")]
    MissingArgType { found: String },
    #[error("expected `then`, found {found:?}")]
    MissingThen { found: String },
    #[error("expected `else`, found {found:?}")]
    MissingElse { found: String },
    #[error("expected `do`, found {found:?}")]
    MissingDo { found: String },
    #[error("unknown basic token {found:?}")]
    UnknownBasicToken { found: String },

    // Type checking
    #[error("name {name:?} is not bound in scope")]
    NameNotBoundInScope { name: String },
    #[error("name {name:?} is already bound in scope")]
    NameAlreadyBoundInScope { name: String },
    #[error("assignment types do not match: expected {expected}, received {received}")]
    AssignmentTypeMismatch { expected: String, received: String },
    #[error("argument types do not match: expected {expected}, received {received}")]
    ArgTypeMismatch { expected: String, received: String },
    #[error("unexpected arguments: expected {expected}, received {received}")]
    ArgNumMismatch { expected: usize, received: usize },
    #[error("callee of type {received} is not a function")]
    CalleeIsNotAFunction { received: String },
    #[error("array member types do not match: expected {expected}, received {received}")]
    ArrayMemberTypeMismatch { expected: String, received: String },
    #[error("left of `.` has type {received}, which is not a tuple")]
    DotLeftIsNotATuple { received: String },
    #[error("right of `.` is not an integer literal")]
    DotRightIsNotAnInt,
    #[error("tuple index {index} out of range for arity {arity}")]
    DotIndexOutOfRange { index: i64, arity: usize },
    #[error("while test has type {received}, expected Bool")]
    WhileTestTypeMismatch { received: String },
    #[error("conditional test has type {received}, expected Bool")]
    CondTestExprTypeMismatch { received: String },
    #[error("conditional branch types do not match: expected {expected}, received {received}")]
    CondBodyExprTypeMismatch { expected: String, received: String },
    #[error("unknown unary operator {op:?}")]
    UnknownUnop { op: String },
    #[error("unknown binary operator {op:?}")]
    UnknownBinop { op: String },
    #[error("unary operator {op:?} has no overload for {operand}")]
    UnopOperandTypeMismatch { op: String, operand: String },
    #[error("binary operator {op:?} has no overload for {left} and {right}")]
    BinopOperandTypeMismatch { op: String, left: String, right: String },
    #[error("function body has type {received}, declared return type is {expected}")]
    ReturnTypeMismatch { expected: String, received: String },

    // Configuration
    #[error("operator {op:?} re-registered with different grammar: {existing} vs {requested}")]
    ConflictingOperatorGrammar {
        op: String,
        existing: String,
        requested: String,
    },
}
