use thiserror::Error;

use crate::program::Type;

macro_rules! malformed_error {
    // Single string version
    ($msg:expr) => {
        crate::Error::Malformed {
            message: $msg.to_string(),
            file: file!(),
            line: line!(),
        }
    };

    // Format string with arguments version
    ($fmt:expr, $($arg:tt)*) => {
        crate::Error::Malformed {
            message: format!($fmt, $($arg)*),
            file: file!(),
            line: line!(),
        }
    };
}

/// The generic Error type, which provides coverage for all errors this library can potentially
/// return.
///
/// The query surface of [`crate::analysis::cha::HierarchyIndex`] never fails: unknown types,
/// unresolved targets and missing definitions are reported as absence or emptiness. Errors
/// only arise when checking that a [`crate::program::Program`] honours the structural
/// contract the index relies on.
///
/// # Error Categories
///
/// ## Program Model Errors
/// - [`Error::Malformed`] - Generic structural breach, with source location
/// - [`Error::MissingReceiver`] - A virtual method lacks its implicit receiver parameter
/// - [`Error::DuplicateType`] - Two class definitions share the same type
/// - [`Error::CyclicHierarchy`] - The parent relation loops back onto itself
/// - [`Error::TypeNotFound`] - A lookup required a definition that is not present
///
/// # Examples
///
/// ```rust
/// use chascope::{Error, program::{Class, Program, Type}};
///
/// let object = Type::new("Ljava/lang/Object;");
/// let program = Program::new(vec![
///     Class::new(object.clone(), None),
///     Class::new(object.clone(), None),
/// ]);
///
/// match program.validate() {
///     Err(Error::DuplicateType(ty)) => assert_eq!(ty, object),
///     other => panic!("unexpected: {other:?}"),
/// }
/// ```
#[derive(Error, Debug)]
pub enum Error {
    /// The program model is structurally damaged.
    ///
    /// The error includes the source location where the malformation was detected
    /// for debugging purposes.
    ///
    /// # Fields
    ///
    /// * `message` - Detailed description of what was malformed
    /// * `file` - Source file where the error was detected
    /// * `line` - Source line where the error was detected
    #[error("Malformed - {file}:{line}: {message}")]
    Malformed {
        /// The message to be printed for the Malformed error
        message: String,
        /// The source file in which this error occured
        file: &'static str,
        /// The source line in which this error occured
        line: u32,
    },

    /// A virtual method was declared without its implicit receiver parameter.
    ///
    /// Every virtual method's parameter list must begin with the receiver; resolution
    /// strips it before comparing against a [`crate::program::MethodRef`].
    #[error("Virtual method {class}->{method} has no receiver parameter")]
    MissingReceiver {
        /// The declaring class
        class: Type,
        /// The offending method's name
        method: String,
    },

    /// More than one class definition was supplied for the same type.
    #[error("Duplicate class definition - {0}")]
    DuplicateType(Type),

    /// Following parent links from this type eventually revisits it.
    #[error("Cyclic class hierarchy through - {0}")]
    CyclicHierarchy(Type),

    /// Failed to find a class definition for a type.
    #[error("Failed to find class definition - {0}")]
    TypeNotFound(Type),
}
