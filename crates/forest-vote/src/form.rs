//! Form-style input and prediction reports.
//!
//! Front ends (web forms, CLI flags, query strings) hand over raw text keyed
//! by feature name. [`read_features`] turns those fields into a feature vector
//! in model order, and [`PredictionReport`] renders the result together with
//! human-readable feature labels.

use std::collections::{BTreeMap, HashMap};
use std::fmt;

use crate::config::ReportConfig;
use crate::error::InvalidInputError;
use crate::inference::VoteTally;
use crate::repr::ForestModel;

// =============================================================================
// FieldSource
// =============================================================================

/// Named raw input fields.
pub trait FieldSource {
    /// Raw text of a field, or `None` if the field is absent.
    fn field(&self, name: &str) -> Option<&str>;
}

impl<S: std::hash::BuildHasher> FieldSource for HashMap<String, String, S> {
    fn field(&self, name: &str) -> Option<&str> {
        self.get(name).map(String::as_str)
    }
}

impl FieldSource for BTreeMap<String, String> {
    fn field(&self, name: &str) -> Option<&str> {
        self.get(name).map(String::as_str)
    }
}

/// Pairs are searched front to back; the first match wins.
impl<K: AsRef<str>, V: AsRef<str>> FieldSource for [(K, V)] {
    fn field(&self, name: &str) -> Option<&str> {
        self.iter()
            .find(|(k, _)| k.as_ref() == name)
            .map(|(_, v)| v.as_ref())
    }
}

impl<K: AsRef<str>, V: AsRef<str>> FieldSource for Vec<(K, V)> {
    fn field(&self, name: &str) -> Option<&str> {
        self.as_slice().field(name)
    }
}

/// Read one value per model feature, in model order.
///
/// Each field is read like a browser's `parseFloat`: leading whitespace is
/// skipped and the longest leading number is taken, so `"5.1cm"` reads as
/// `5.1`. A field with no leading number, or one that reads as infinite, is
/// rejected with the offending feature's name.
pub fn read_features<F>(model: &ForestModel, source: &F) -> Result<Vec<f64>, InvalidInputError>
where
    F: FieldSource + ?Sized,
{
    model
        .feature_names()
        .iter()
        .map(|name| {
            let raw = source.field(name).ok_or_else(|| InvalidInputError::Missing {
                feature: name.clone(),
            })?;
            let value = parse_leading_float(raw).ok_or_else(|| InvalidInputError::Unparseable {
                feature: name.clone(),
                raw: raw.to_string(),
            })?;
            if !value.is_finite() {
                return Err(InvalidInputError::NonFinite {
                    feature: name.clone(),
                    value,
                });
            }
            Ok(value)
        })
        .collect()
}

/// Longest numeric prefix of `raw` after leading whitespace.
///
/// Accepts an optional sign, then `Infinity` or decimal digits with an
/// optional fraction and exponent. An exponent without digits is left off
/// (`"2e"` reads as `2`). Returns `None` when no digits lead the text.
fn parse_leading_float(raw: &str) -> Option<f64> {
    let text = raw.trim_start();
    let bytes = text.as_bytes();
    let mut end = 0;

    if matches!(bytes.first(), Some(b'+' | b'-')) {
        end += 1;
    }
    if text[end..].starts_with("Infinity") {
        let value = f64::INFINITY;
        return Some(if bytes[0] == b'-' { -value } else { value });
    }

    let digits_from = |start: usize| bytes[start..].iter().take_while(|b| b.is_ascii_digit()).count();

    let int_digits = digits_from(end);
    end += int_digits;
    let mut frac_digits = 0;
    if bytes.get(end) == Some(&b'.') {
        frac_digits = digits_from(end + 1);
        if int_digits > 0 || frac_digits > 0 {
            end += 1 + frac_digits;
        }
    }
    if int_digits == 0 && frac_digits == 0 {
        return None;
    }

    if matches!(bytes.get(end), Some(b'e' | b'E')) {
        let mut exp = end + 1;
        if matches!(bytes.get(exp), Some(b'+' | b'-')) {
            exp += 1;
        }
        let exp_digits = digits_from(exp);
        if exp_digits > 0 {
            end = exp + exp_digits;
        }
    }

    text[..end].parse().ok()
}

// =============================================================================
// Labels
// =============================================================================

/// Display label for a feature name.
///
/// The first underscore becomes a space, then every word starts upper-case:
/// `sepal_length` becomes `Sepal Length`. Later underscores are kept, so
/// `petal_width_cm` becomes `Petal Width_cm`.
pub fn feature_label(name: &str) -> String {
    let spaced = name.replacen('_', " ", 1);
    let mut label = String::with_capacity(spaced.len());
    let mut prev_is_word = false;
    for ch in spaced.chars() {
        let is_word = ch.is_ascii_alphanumeric() || ch == '_';
        if is_word && !prev_is_word {
            label.push(ch.to_ascii_uppercase());
        } else {
            label.push(ch);
        }
        prev_is_word = is_word;
    }
    label
}

// =============================================================================
// PredictionReport
// =============================================================================

/// One feature value as shown in a report.
#[derive(Debug, Clone, PartialEq)]
pub struct FeatureReading {
    pub name: String,
    pub label: String,
    pub value: f64,
}

/// Votes received by one class.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClassVotes {
    pub class: String,
    pub votes: u32,
}

/// Prediction result ready for display.
#[derive(Debug, Clone, PartialEq)]
pub struct PredictionReport {
    /// Predicted class name.
    pub prediction: String,
    /// Inputs in model order.
    pub features: Vec<FeatureReading>,
    /// Votes per class, in class order.
    pub votes: Vec<ClassVotes>,
    /// Unit appended to feature values.
    pub unit: String,
}

impl PredictionReport {
    /// Assemble a report from a prediction.
    pub fn new(
        model: &ForestModel,
        features: &[f64],
        prediction: &str,
        tally: &VoteTally,
        config: &ReportConfig,
    ) -> Self {
        let features = model
            .feature_names()
            .iter()
            .zip(features)
            .map(|(name, &value)| FeatureReading {
                name: name.clone(),
                label: feature_label(name),
                value,
            })
            .collect();

        let votes = model
            .target_names()
            .iter()
            .enumerate()
            .map(|(class, name)| ClassVotes {
                class: name.clone(),
                votes: tally.count(class),
            })
            .collect();

        Self {
            prediction: prediction.to_string(),
            features,
            votes,
            unit: config.unit.clone(),
        }
    }
}

impl fmt::Display for PredictionReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Prediction: {}", self.prediction)?;
        for reading in &self.features {
            write!(f, "\n- {}: {}", reading.label, reading.value)?;
            if !self.unit.is_empty() {
                write!(f, " {}", self.unit)?;
            }
        }
        Ok(())
    }
}
