//! Wire formats for reward payloads.
//!
//! Each payload is a JSON array with one object per arm. Keys match
//! case-insensitively, unknown keys are ignored, and `null` counts as
//! missing.

use mab_config::WireFamily;
use mab_math::Dist;
use serde_json::{Map, Value};
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum ParseError {
    #[error("failed to unmarshal response: {0}")]
    Json(String),

    #[error("expected a JSON array of arms")]
    NotArray,

    #[error("arm {arm} is not a JSON object")]
    NotObject { arm: usize },

    #[error("missing {field} value for arm {arm}")]
    Missing { field: &'static str, arm: usize },

    #[error("arm {arm} {field} must be a number")]
    NotNumber { field: &'static str, arm: usize },

    #[error("arm {arm} {field} must be {requirement}, got {value}")]
    OutOfRange {
        field: &'static str,
        arm: usize,
        requirement: &'static str,
        value: f64,
    },

    #[error("arm {arm}: {reason}")]
    Invalid { arm: usize, reason: String },
}

/// Turns a response body into a reward vector.
pub trait RewardParser: Send + Sync {
    fn parse(&self, body: &[u8]) -> Result<Vec<Dist>, ParseError>;
}

/// Adapts a plain function or closure into a [`RewardParser`].
#[derive(Debug, Clone, Copy)]
pub struct ParseFn<F>(pub F);

impl<F> RewardParser for ParseFn<F>
where
    F: Fn(&[u8]) -> Result<Vec<Dist>, ParseError> + Send + Sync,
{
    fn parse(&self, body: &[u8]) -> Result<Vec<Dist>, ParseError> {
        (self.0)(body)
    }
}

impl RewardParser for WireFamily {
    fn parse(&self, body: &[u8]) -> Result<Vec<Dist>, ParseError> {
        match self {
            WireFamily::Beta => beta_from_json(body),
            WireFamily::Normal => normal_from_json(body),
            WireFamily::Point => point_from_json(body),
        }
    }
}

impl<P: RewardParser + ?Sized> RewardParser for Box<P> {
    fn parse(&self, body: &[u8]) -> Result<Vec<Dist>, ParseError> {
        (**self).parse(body)
    }
}

/// `[{"alpha": a, "beta": b}, ...]`, both at least 1.
pub fn beta_from_json(body: &[u8]) -> Result<Vec<Dist>, ParseError> {
    arms(body)?
        .iter()
        .enumerate()
        .map(|(arm, obj)| {
            let alpha = at_least_one(required(obj, "alpha", arm)?, "alpha", arm)?;
            let beta = at_least_one(required(obj, "beta", arm)?, "beta", arm)?;
            Dist::beta(alpha, beta).map_err(|e| ParseError::Invalid {
                arm,
                reason: e.to_string(),
            })
        })
        .collect()
}

/// `[{"mu": m, "sigma": s}, ...]` with `s >= 0`.
pub fn normal_from_json(body: &[u8]) -> Result<Vec<Dist>, ParseError> {
    arms(body)?
        .iter()
        .enumerate()
        .map(|(arm, obj)| {
            let mu = required(obj, "mu", arm)?;
            let sigma = required(obj, "sigma", arm)?;
            if sigma < 0.0 {
                return Err(ParseError::OutOfRange {
                    field: "sigma",
                    arm,
                    requirement: ">= 0",
                    value: sigma,
                });
            }
            Dist::normal(mu, sigma).map_err(|e| ParseError::Invalid {
                arm,
                reason: e.to_string(),
            })
        })
        .collect()
}

/// `[{"mu": m}, ...]`
pub fn point_from_json(body: &[u8]) -> Result<Vec<Dist>, ParseError> {
    arms(body)?
        .iter()
        .enumerate()
        .map(|(arm, obj)| {
            Dist::try_point(required(obj, "mu", arm)?).map_err(|e| ParseError::Invalid {
                arm,
                reason: e.to_string(),
            })
        })
        .collect()
}

fn arms(body: &[u8]) -> Result<Vec<Map<String, Value>>, ParseError> {
    let value: Value =
        serde_json::from_slice(body).map_err(|e| ParseError::Json(e.to_string()))?;
    let Value::Array(items) = value else {
        return Err(ParseError::NotArray);
    };
    items
        .into_iter()
        .enumerate()
        .map(|(arm, item)| match item {
            Value::Object(obj) => Ok(obj),
            _ => Err(ParseError::NotObject { arm }),
        })
        .collect()
}

fn required(obj: &Map<String, Value>, field: &'static str, arm: usize) -> Result<f64, ParseError> {
    // Exact key first, then any case-insensitive match.
    let value = obj.get(field).or_else(|| {
        obj.iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(field))
            .map(|(_, v)| v)
    });
    match value {
        None | Some(Value::Null) => Err(ParseError::Missing { field, arm }),
        Some(v) => v.as_f64().ok_or(ParseError::NotNumber { field, arm }),
    }
}

fn at_least_one(value: f64, field: &'static str, arm: usize) -> Result<f64, ParseError> {
    if value < 1.0 {
        return Err(ParseError::OutOfRange {
            field,
            arm,
            requirement: ">= 1",
            value,
        });
    }
    Ok(value)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn beta_payload() {
        let body = br#"[{"alpha": 10, "beta": 20}, {"Alpha": 1, "BETA": 5, "extra": "x"}]"#;
        let arms = beta_from_json(body).unwrap();
        assert_eq!(
            arms,
            vec![Dist::beta(10.0, 20.0).unwrap(), Dist::beta(1.0, 5.0).unwrap()]
        );
    }

    #[test]
    fn beta_errors_name_the_arm() {
        let missing = beta_from_json(br#"[{"alpha": 2, "beta": 2}, {"alpha": 3}]"#).unwrap_err();
        assert_eq!(missing, ParseError::Missing { field: "beta", arm: 1 });
        assert_eq!(missing.to_string(), "missing beta value for arm 1");

        let small = beta_from_json(br#"[{"alpha": 0.5, "beta": 2}]"#).unwrap_err();
        assert!(matches!(small, ParseError::OutOfRange { field: "alpha", arm: 0, .. }));

        let null = beta_from_json(br#"[{"alpha": null, "beta": 2}]"#).unwrap_err();
        assert_eq!(null, ParseError::Missing { field: "alpha", arm: 0 });
    }

    #[test]
    fn normal_payload() {
        let arms = normal_from_json(br#"[{"mu": 1.5, "sigma": 0.2}, {"MU": -3, "Sigma": 0}]"#)
            .unwrap();
        assert_eq!(arms[0], Dist::normal(1.5, 0.2).unwrap());
        assert_eq!(arms[1], Dist::normal(-3.0, 0.0).unwrap());

        let err = normal_from_json(br#"[{"mu": 0, "sigma": -1}]"#).unwrap_err();
        assert!(matches!(err, ParseError::OutOfRange { field: "sigma", .. }));
    }

    #[test]
    fn point_payload() {
        let arms = point_from_json(br#"[{"mu": 4}, {"Mu": 0.25}]"#).unwrap();
        assert_eq!(arms, vec![Dist::point(4.0), Dist::point(0.25)]);
        assert_eq!(
            point_from_json(br#"[{"value": 1}]"#).unwrap_err(),
            ParseError::Missing { field: "mu", arm: 0 }
        );
    }

    #[test]
    fn shape_errors() {
        assert!(matches!(beta_from_json(b"not json"), Err(ParseError::Json(_))));
        assert_eq!(beta_from_json(br#"{"alpha": 1}"#), Err(ParseError::NotArray));
        assert_eq!(point_from_json(br#"[1]"#), Err(ParseError::NotObject { arm: 0 }));
        assert_eq!(
            point_from_json(br#"[{"mu": "high"}]"#),
            Err(ParseError::NotNumber { field: "mu", arm: 0 })
        );
        assert_eq!(point_from_json(b"[]").unwrap(), Vec::<Dist>::new());
    }

    #[test]
    fn family_and_closure_parsers() {
        let body = br#"[{"mu": 2}]"#;
        assert_eq!(WireFamily::Point.parse(body).unwrap(), vec![Dist::point(2.0)]);
        let constant = ParseFn(|_: &[u8]| -> Result<Vec<Dist>, ParseError> { Ok(vec![Dist::null()]) });
        assert_eq!(constant.parse(b"ignored").unwrap(), vec![Dist::null()]);
    }
}
