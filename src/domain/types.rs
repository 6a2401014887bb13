//! Strongly-typed value objects used by domain entities.
//!
//! Domain structs should carry these wrappers instead of raw primitives so that
//! identifiers, text values and numeric constraints are enforced at the
//! boundary.

use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};
use thiserror::Error;
use validator::{ValidateEmail, ValidateUrl};

use crate::domain::slug::slugify;

/// Maximum number of photos attached to a single business.
pub const MAX_BUSINESS_PHOTOS: usize = 5;

/// Lowest accepted review rating.
pub const MIN_REVIEW_RATING: f64 = 1.0;

/// Highest accepted review rating.
pub const MAX_REVIEW_RATING: f64 = 5.0;

/// Errors produced when attempting to construct constrained domain types.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum TypeConstraintError {
    /// An identifier was zero or negative.
    #[error("{0} must be greater than zero")]
    NonPositiveId(&'static str),
    /// A string was empty or whitespace-only after trimming.
    #[error("{0} cannot be empty")]
    EmptyString(&'static str),
    /// URL validation failed.
    #[error("{0} must be a valid URL")]
    InvalidUrl(&'static str),
    /// E-mail validation failed.
    #[error("{0} must be a valid e-mail address")]
    InvalidEmail(&'static str),
    /// A rating fell outside of the accepted range.
    #[error("rating must be between 1 and 5")]
    RatingOutOfRange,
    /// A bounded collection received too many items.
    #[error("{field} accepts at most {max} items")]
    TooManyItems { field: &'static str, max: usize },
    /// Catch-all for custom validation failures.
    #[error("invalid value: {0}")]
    InvalidValue(String),
}

fn trim_and_require_non_empty<S: Into<String>>(
    value: S,
    field: &'static str,
) -> Result<String, TypeConstraintError> {
    let trimmed = value.into().trim().to_string();
    if trimmed.is_empty() {
        Err(TypeConstraintError::EmptyString(field))
    } else {
        Ok(trimmed)
    }
}

/// Wrapper for non-empty, trimmed strings.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[serde(transparent)]
pub struct NonEmptyString(String);

impl NonEmptyString {
    /// Trims whitespace and rejects empty inputs.
    pub fn new<S: Into<String>>(value: S) -> Result<Self, TypeConstraintError> {
        Self::new_for_field(value, "value")
    }

    /// Same as [`Self::new`] but with field-specific error context.
    pub fn new_for_field<S: Into<String>>(
        value: S,
        field: &'static str,
    ) -> Result<Self, TypeConstraintError> {
        trim_and_require_non_empty(value, field).map(Self)
    }

    /// Borrow the inner string.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Consume the wrapper returning the owned string.
    pub fn into_inner(self) -> String {
        self.0
    }
}

impl Display for NonEmptyString {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Shared string accessors and conversions for the text newtypes below.
macro_rules! string_newtype_impls {
    ($name:ident) => {
        impl $name {
            /// Borrow the value as a string slice.
            pub fn as_str(&self) -> &str {
                &self.0
            }

            /// Consume the wrapper and return the owned string.
            pub fn into_inner(self) -> String {
                self.0
            }
        }

        impl Display for $name {
            fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl std::ops::Deref for $name {
            type Target = str;

            fn deref(&self) -> &Self::Target {
                self.as_str()
            }
        }

        impl AsRef<str> for $name {
            fn as_ref(&self) -> &str {
                self.as_str()
            }
        }

        impl TryFrom<String> for $name {
            type Error = TypeConstraintError;

            fn try_from(value: String) -> Result<Self, Self::Error> {
                Self::new(value)
            }
        }

        impl TryFrom<&str> for $name {
            type Error = TypeConstraintError;

            fn try_from(value: &str) -> Result<Self, Self::Error> {
                Self::new(value)
            }
        }

        impl From<$name> for String {
            fn from(value: $name) -> Self {
                value.0
            }
        }

        impl PartialEq<&str> for $name {
            fn eq(&self, other: &&str) -> bool {
                self.as_str() == *other
            }
        }

        impl PartialEq<$name> for &str {
            fn eq(&self, other: &$name) -> bool {
                *self == other.as_str()
            }
        }
    };
}

/// Macro to generate lightweight newtypes for positive identifiers.
macro_rules! id_newtype {
    ($name:ident, $doc:expr, $field:expr) => {
        #[doc = $doc]
        #[derive(
            Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord,
        )]
        #[serde(transparent)]
        pub struct $name(i32);

        impl $name {
            /// Creates a new identifier ensuring it is greater than zero.
            pub fn new(value: i32) -> Result<Self, TypeConstraintError> {
                if value > 0 {
                    Ok(Self(value))
                } else {
                    Err(TypeConstraintError::NonPositiveId($field))
                }
            }

            /// Parses an identifier from its textual form.
            ///
            /// Anything that is not a positive base-10 integer is rejected.
            pub fn parse(value: &str) -> Result<Self, TypeConstraintError> {
                let raw = value.trim().parse::<i32>().map_err(|_| {
                    TypeConstraintError::InvalidValue(format!("{}: {value:?}", $field))
                })?;
                Self::new(raw)
            }

            /// Returns the raw `i32` backing this identifier.
            pub const fn get(self) -> i32 {
                self.0
            }
        }

        impl Display for $name {
            fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl TryFrom<i32> for $name {
            type Error = TypeConstraintError;

            fn try_from(value: i32) -> Result<Self, Self::Error> {
                Self::new(value)
            }
        }

        impl From<$name> for i32 {
            fn from(value: $name) -> Self {
                value.0
            }
        }

        impl PartialEq<i32> for $name {
            fn eq(&self, other: &i32) -> bool {
                self.0 == *other
            }
        }

        impl PartialEq<$name> for i32 {
            fn eq(&self, other: &$name) -> bool {
                *self == other.0
            }
        }
    };
}

macro_rules! non_empty_string_newtype {
    ($name:ident, $doc:expr, $field:expr) => {
        #[doc = $doc]
        #[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
        #[serde(transparent)]
        pub struct $name(String);

        impl $name {
            /// Constructs a trimmed, non-empty value.
            pub fn new<S: Into<String>>(value: S) -> Result<Self, TypeConstraintError> {
                let inner = NonEmptyString::new_for_field(value, $field)?;
                Ok(Self(inner.into_inner()))
            }
        }

        string_newtype_impls!($name);
    };
}

macro_rules! url_string_newtype {
    ($name:ident, $doc:expr, $field:expr) => {
        #[doc = $doc]
        #[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
        #[serde(transparent)]
        pub struct $name(String);

        impl $name {
            /// Constructs a trimmed URL and validates its format.
            pub fn new<S: Into<String>>(value: S) -> Result<Self, TypeConstraintError> {
                let trimmed = trim_and_require_non_empty(value, $field)?;
                if !trimmed.as_str().validate_url() {
                    return Err(TypeConstraintError::InvalidUrl($field));
                }
                Ok(Self(trimmed))
            }
        }

        string_newtype_impls!($name);
    };
}

id_newtype!(
    CategoryId,
    "Unique identifier for a category.",
    "category_id"
);
id_newtype!(
    BusinessId,
    "Unique identifier for a business.",
    "business_id"
);
id_newtype!(UserId, "Unique identifier for a user.", "user_id");

non_empty_string_newtype!(
    CategoryName,
    "Category name enforcing non-empty values.",
    "category name"
);
non_empty_string_newtype!(
    CategoryDescription,
    "Category description enforcing non-empty values.",
    "category description"
);
non_empty_string_newtype!(
    CategoryIcon,
    "Category icon reference (icon name or image URL).",
    "category icon"
);
non_empty_string_newtype!(
    BusinessName,
    "Business name enforcing non-empty values.",
    "business name"
);
non_empty_string_newtype!(
    BusinessDescription,
    "Business description enforcing non-empty values.",
    "description"
);
non_empty_string_newtype!(
    BusinessAddress,
    "Postal address of a business.",
    "address"
);
non_empty_string_newtype!(BusinessPhone, "Business contact phone.", "phone");
non_empty_string_newtype!(
    ReviewComment,
    "Review text enforcing non-empty values.",
    "comment"
);
non_empty_string_newtype!(UserName, "Display name of a user.", "user name");

url_string_newtype!(WebsiteUrl, "Business website URL.", "website");
url_string_newtype!(PhotoUrl, "Public URL of a business photo.", "photo url");

/// Free-text category reference matched exactly against category names and
/// slugs. Kept verbatim: surrounding whitespace is part of the token.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[serde(transparent)]
pub struct CategoryReference(String);

impl CategoryReference {
    /// Rejects blank input without altering the token.
    pub fn new<S: Into<String>>(value: S) -> Result<Self, TypeConstraintError> {
        let value = value.into();
        if value.trim().is_empty() {
            return Err(TypeConstraintError::EmptyString("category"));
        }
        Ok(Self(value))
    }
}

string_newtype_impls!(CategoryReference);

/// URL-safe category key, unique across all categories.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[serde(transparent)]
pub struct CategorySlug(String);

impl CategorySlug {
    /// Constructs a trimmed slug that contains no whitespace.
    pub fn new<S: Into<String>>(value: S) -> Result<Self, TypeConstraintError> {
        let trimmed = trim_and_require_non_empty(value, "category slug")?;
        if trimmed.chars().any(char::is_whitespace) {
            return Err(TypeConstraintError::InvalidValue(format!(
                "category slug must not contain whitespace: {trimmed:?}"
            )));
        }
        Ok(Self(trimmed))
    }

    /// Derives a slug from a category name.
    pub fn from_name(name: &CategoryName) -> Result<Self, TypeConstraintError> {
        let slug = slugify(name.as_str());
        if slug.is_empty() {
            return Err(TypeConstraintError::EmptyString("category slug"));
        }
        Ok(Self(slug))
    }
}

string_newtype_impls!(CategorySlug);

/// Validated e-mail address.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[serde(transparent)]
pub struct EmailAddress(String);

impl EmailAddress {
    /// Constructs a trimmed e-mail address and validates its format.
    pub fn new<S: Into<String>>(value: S) -> Result<Self, TypeConstraintError> {
        let trimmed = trim_and_require_non_empty(value, "email")?;
        if !trimmed.as_str().validate_email() {
            return Err(TypeConstraintError::InvalidEmail("email"));
        }
        Ok(Self(trimmed))
    }
}

string_newtype_impls!(EmailAddress);

/// Ordered list of photo URLs, bounded by [`MAX_BUSINESS_PHOTOS`].
#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(transparent)]
pub struct BusinessPhotos(Vec<PhotoUrl>);

impl BusinessPhotos {
    pub fn new(photos: Vec<PhotoUrl>) -> Result<Self, TypeConstraintError> {
        if photos.len() > MAX_BUSINESS_PHOTOS {
            return Err(TypeConstraintError::TooManyItems {
                field: "photos",
                max: MAX_BUSINESS_PHOTOS,
            });
        }
        Ok(Self(photos))
    }

    pub fn as_slice(&self) -> &[PhotoUrl] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn into_inner(self) -> Vec<PhotoUrl> {
        self.0
    }
}

impl TryFrom<Vec<String>> for BusinessPhotos {
    type Error = TypeConstraintError;

    fn try_from(value: Vec<String>) -> Result<Self, Self::Error> {
        let photos = value
            .into_iter()
            .map(PhotoUrl::new)
            .collect::<Result<Vec<_>, _>>()?;
        Self::new(photos)
    }
}

/// Star rating attached to a review, within [1.0, 5.0].
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, PartialOrd)]
#[serde(transparent)]
pub struct ReviewRating(f64);

impl ReviewRating {
    /// Constructs a validated rating.
    pub fn new(value: f64) -> Result<Self, TypeConstraintError> {
        if value.is_finite() && (MIN_REVIEW_RATING..=MAX_REVIEW_RATING).contains(&value) {
            Ok(Self(value))
        } else {
            Err(TypeConstraintError::RatingOutOfRange)
        }
    }

    /// Returns the raw `f64` value.
    pub const fn get(self) -> f64 {
        self.0
    }
}

impl Display for ReviewRating {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl TryFrom<f64> for ReviewRating {
    type Error = TypeConstraintError;

    fn try_from(value: f64) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<ReviewRating> for f64 {
    fn from(value: ReviewRating) -> Self {
        value.0
    }
}

impl PartialEq<f64> for ReviewRating {
    fn eq(&self, other: &f64) -> bool {
        self.0 == *other
    }
}
