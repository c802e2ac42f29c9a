use std::cell::{Cell, RefCell};
use std::rc::Rc;
use std::str::FromStr;
use thiserror::Error;

use crate::api::capture::{coerce, Fulfill, Rejection};
use crate::parser::TokenSets;

#[cfg(feature = "tracing_debug")]
use tracing::debug;

type Validator<T> = Box<dyn Fn(&T) -> Result<(), String>>;

#[derive(Debug)]
enum Slot<T> {
    Unset,
    Set(T),
}

struct PromiseState<T> {
    name: String,
    slot: Slot<T>,
    validator: Option<Validator<T>>,
}

impl<T> PromiseState<T> {
    fn shared(name: String) -> Rc<RefCell<Self>> {
        Rc::new(RefCell::new(Self {
            name,
            slot: Slot::Unset,
            validator: None,
        }))
    }

    fn take(&mut self) -> Option<T> {
        match std::mem::replace(&mut self.slot, Slot::Unset) {
            Slot::Set(value) => Some(value),
            Slot::Unset => None,
        }
    }
}

impl<T: Clone> PromiseState<T> {
    fn value(&self) -> Option<T> {
        match &self.slot {
            Slot::Set(value) => Some(value.clone()),
            Slot::Unset => None,
        }
    }
}

/// Error from reading a required [`Promise`] which parsing never fulfilled.
///
/// This indicates a bug in the calling program: the promise was read before [`crate::Parser::parse`] succeeded.
#[derive(Debug, Error, PartialEq, Eq)]
#[error("Promise '{name}' was read before parsing fulfilled it.")]
pub struct UnfulfilledPromise {
    name: String,
}

impl UnfulfilledPromise {
    /// The declared name of the unfulfilled promise.
    pub fn name(&self) -> &str {
        &self.name
    }
}

/// A required positional value, fulfilled during parsing.
///
/// Handles are cheap to clone; every clone refers to the same value.
///
/// ### Example
/// ```
/// # use argpromise_builder as argpromise;
/// use argpromise::Parser;
///
/// let mut parser = Parser::new(&["program", "7"]);
/// let count = parser.int("count");
/// parser.parse().unwrap();
///
/// assert_eq!(count.value().unwrap(), 7);
/// ```
pub struct Promise<T> {
    state: Rc<RefCell<PromiseState<T>>>,
}

impl<T> Clone for Promise<T> {
    fn clone(&self) -> Self {
        Self {
            state: self.state.clone(),
        }
    }
}

impl<T: std::fmt::Debug> std::fmt::Debug for Promise<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let state = self.state.borrow();
        f.debug_struct("Promise")
            .field("name", &state.name)
            .field("slot", &state.slot)
            .finish()
    }
}

impl<T> Promise<T> {
    pub(crate) fn new(name: impl Into<String>) -> Self {
        Self {
            state: PromiseState::shared(name.into()),
        }
    }

    pub(crate) fn binding<'a>(&self) -> Box<dyn Fulfill + 'a>
    where
        T: FromStr + 'a,
    {
        Box::new(PromiseBinding {
            name: self.name(),
            state: self.state.clone(),
            optional: false,
        })
    }

    /// The declared name of this promise.
    pub fn name(&self) -> String {
        self.state.borrow().name.clone()
    }

    /// Reject otherwise convertible values.
    /// The `Err` reason is reported verbatim in the parse error.
    /// If repeated, only the final validator will apply.
    ///
    /// ### Example
    /// ```
    /// # use argpromise_builder as argpromise;
    /// use argpromise::Parser;
    ///
    /// let mut parser = Parser::new(&["program", "0"]);
    /// let _ = parser.int("count").validate(|count| {
    ///     if *count > 0 {
    ///         Ok(())
    ///     } else {
    ///         Err("it must be positive".to_string())
    ///     }
    /// });
    ///
    /// let error = parser.parse().unwrap_err();
    /// assert!(error.to_string().starts_with("Failed to parse count: it must be positive"));
    /// ```
    pub fn validate(self, validator: impl Fn(&T) -> Result<(), String> + 'static) -> Self {
        self.state.borrow_mut().validator.replace(Box::new(validator));
        self
    }

    /// Whether parsing has fulfilled this promise.
    pub fn is_fulfilled(&self) -> bool {
        matches!(self.state.borrow().slot, Slot::Set(_))
    }

    /// Move the parsed value out of this promise.
    /// Afterwards, the promise (and all its clones) are unfulfilled.
    pub fn take(&self) -> Result<T, UnfulfilledPromise> {
        let mut state = self.state.borrow_mut();
        state.take().ok_or_else(|| UnfulfilledPromise {
            name: state.name.clone(),
        })
    }
}

impl<T: Clone> Promise<T> {
    /// The parsed value.
    /// Only available after parsing succeeds; otherwise this is a programming error reported as [`UnfulfilledPromise`].
    pub fn value(&self) -> Result<T, UnfulfilledPromise> {
        let state = self.state.borrow();
        state.value().ok_or_else(|| UnfulfilledPromise {
            name: state.name.clone(),
        })
    }
}

/// An optional positional value, possibly fulfilled during parsing.
///
/// Handles are cheap to clone; every clone refers to the same value.
///
/// ### Example
/// ```
/// # use argpromise_builder as argpromise;
/// use argpromise::Parser;
///
/// let mut parser = Parser::new(&["program"]);
/// let name = parser.optional_string("name");
/// parser.parse().unwrap();
///
/// assert_eq!(name.value(), None);
/// ```
pub struct OptionalPromise<T> {
    state: Rc<RefCell<PromiseState<T>>>,
}

impl<T> Clone for OptionalPromise<T> {
    fn clone(&self) -> Self {
        Self {
            state: self.state.clone(),
        }
    }
}

impl<T: std::fmt::Debug> std::fmt::Debug for OptionalPromise<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let state = self.state.borrow();
        f.debug_struct("OptionalPromise")
            .field("name", &state.name)
            .field("slot", &state.slot)
            .finish()
    }
}

impl<T> OptionalPromise<T> {
    pub(crate) fn new(name: impl Into<String>) -> Self {
        Self {
            state: PromiseState::shared(name.into()),
        }
    }

    pub(crate) fn binding<'a>(&self) -> Box<dyn Fulfill + 'a>
    where
        T: FromStr + 'a,
    {
        Box::new(PromiseBinding {
            name: self.name(),
            state: self.state.clone(),
            optional: true,
        })
    }

    /// The declared name of this promise.
    pub fn name(&self) -> String {
        self.state.borrow().name.clone()
    }

    /// Reject otherwise convertible values.
    /// The `Err` reason is reported verbatim in the parse error.
    /// If repeated, only the final validator will apply.
    pub fn validate(self, validator: impl Fn(&T) -> Result<(), String> + 'static) -> Self {
        self.state.borrow_mut().validator.replace(Box::new(validator));
        self
    }

    /// Move the parsed value (if any) out of this promise.
    pub fn take(&self) -> Option<T> {
        self.state.borrow_mut().take()
    }
}

impl<T: Clone> OptionalPromise<T> {
    /// The parsed value, or `None` when the positional was not provided.
    pub fn value(&self) -> Option<T> {
        self.state.borrow().value()
    }
}

// The parser side of a promise.
// Keeps its own copy of the name so the specification can be rendered without borrowing the state.
struct PromiseBinding<T> {
    name: String,
    state: Rc<RefCell<PromiseState<T>>>,
    optional: bool,
}

impl<T: FromStr> PromiseBinding<T> {
    fn check(&self, value: &T) -> Result<(), Rejection> {
        let state = self.state.borrow();
        match &state.validator {
            Some(validator) => validator(value).map_err(Rejection::Invalid),
            None => Ok(()),
        }
    }
}

impl<T: FromStr> Fulfill for PromiseBinding<T> {
    fn name(&self) -> &str {
        &self.name
    }

    fn is_optional(&self) -> bool {
        self.optional
    }

    fn fulfill(&mut self, token: &str) -> Result<(), Rejection> {
        let value: T = coerce(token)?;
        self.check(&value)?;
        self.state.borrow_mut().slot = Slot::Set(value);
        Ok(())
    }
}

/// A boolean flag, set when `--NAME` (or the abbreviation `-N`) appears anywhere in the input.
///
/// Option promises are not positional; they are visible to every nested command parser.
///
/// ### Example
/// ```
/// # use argpromise_builder as argpromise;
/// use argpromise::Parser;
///
/// let mut parser = Parser::new(&["program", "-v"]);
/// let verbose = parser.option("verbose", Some('v'));
/// let dry_run = parser.option("dry-run", None);
/// parser.parse().unwrap();
///
/// assert!(verbose.was_present());
/// assert!(!dry_run.was_present());
/// ```
#[derive(Debug, Clone)]
pub struct OptionPromise {
    state: Rc<OptionState>,
}

#[derive(Debug)]
struct OptionState {
    name: String,
    abbreviation: Option<char>,
    present: Cell<bool>,
}

impl OptionPromise {
    pub(crate) fn new(name: impl Into<String>, abbreviation: Option<char>) -> Self {
        Self {
            state: Rc::new(OptionState {
                name: name.into(),
                abbreviation,
                present: Cell::new(false),
            }),
        }
    }

    /// The long name of this option, matched via `--NAME`.
    pub fn name(&self) -> &str {
        &self.state.name
    }

    /// The short name of this option, matched via `-N`.
    pub fn abbreviation(&self) -> Option<char> {
        self.state.abbreviation
    }

    /// Whether the option appeared in the parsed input.
    pub fn was_present(&self) -> bool {
        self.state.present.get()
    }

    pub(crate) fn scan(&self, tokens: &TokenSets) {
        let present = tokens.long_flags().iter().any(|flag| flag == &self.state.name)
            || self
                .state
                .abbreviation
                .map_or(false, |short| tokens.short_flags().contains(&short));

        #[cfg(feature = "tracing_debug")]
        {
            debug!("Option '{}' present: {present}.", self.state.name);
        }

        self.state.present.set(present);
    }
}
