//! Conversion between runtime artifacts and their schema types.
//!
//! Loading validates every shape and value before a runtime type is built,
//! so the panicking constructors of the runtime types are never reached
//! from file input.

use ndarray::{Array1, Array2};

use super::error::ReadError;
use super::schema::{LogisticRegressionSchema, PcaSchema, ScalerSchema};
use crate::model::LogisticRegression;
use crate::preprocess::{Pca, StandardScaler, Transformer};

// =============================================================================
// Validation helpers
// =============================================================================

fn invalid(kind: &str, msg: impl std::fmt::Display) -> ReadError {
    ReadError::Validation(format!("{kind}: {msg}"))
}

fn check_len(kind: &str, field: &str, values: &[f64], expected: usize) -> Result<(), ReadError> {
    if values.len() != expected {
        return Err(invalid(
            kind,
            format_args!("{field} has {} entries, expected {expected}", values.len()),
        ));
    }
    Ok(())
}

fn check_finite(kind: &str, field: &str, values: &[f64]) -> Result<(), ReadError> {
    match values.iter().position(|v| !v.is_finite()) {
        Some(idx) => Err(invalid(kind, format_args!("{field}[{idx}] is not finite"))),
        None => Ok(()),
    }
}

fn check_positive(kind: &str, field: &str, values: &[f64]) -> Result<(), ReadError> {
    match values.iter().position(|&v| v <= 0.0) {
        Some(idx) => Err(invalid(kind, format_args!("{field}[{idx}] must be positive"))),
        None => Ok(()),
    }
}

// =============================================================================
// StandardScaler
// =============================================================================

impl TryFrom<ScalerSchema> for StandardScaler {
    type Error = ReadError;

    fn try_from(schema: ScalerSchema) -> Result<Self, Self::Error> {
        const KIND: &str = ScalerSchema::KIND;
        let n = schema.n_features_in;
        if n == 0 {
            return Err(invalid(KIND, "n_features_in must be at least 1"));
        }

        if let Some(mean) = &schema.mean {
            check_len(KIND, "mean", mean, n)?;
            check_finite(KIND, "mean", mean)?;
        }
        if let Some(scale) = &schema.scale {
            check_len(KIND, "scale", scale, n)?;
            check_finite(KIND, "scale", scale)?;
            check_positive(KIND, "scale", scale)?;
        }
        if let Some(names) = &schema.feature_names {
            if names.len() != n {
                return Err(invalid(
                    KIND,
                    format_args!("feature_names has {} entries, expected {n}", names.len()),
                ));
            }
        }

        let scaler = StandardScaler::from_parts(
            n,
            schema.mean.map(Array1::from),
            schema.scale.map(Array1::from),
        );
        Ok(match schema.feature_names {
            Some(names) => scaler.with_feature_names(names),
            None => scaler,
        })
    }
}

impl From<&StandardScaler> for ScalerSchema {
    fn from(scaler: &StandardScaler) -> Self {
        Self {
            n_features_in: scaler.n_features_in(),
            mean: scaler.mean().map(|m| m.to_vec()),
            scale: scaler.scale().map(|s| s.to_vec()),
            feature_names: scaler.feature_names().map(<[String]>::to_vec),
        }
    }
}

// =============================================================================
// Pca
// =============================================================================

impl TryFrom<PcaSchema> for Pca {
    type Error = ReadError;

    fn try_from(schema: PcaSchema) -> Result<Self, Self::Error> {
        const KIND: &str = PcaSchema::KIND;
        let n_features = schema.mean.len();
        let n_components = schema.components.len();
        if n_features == 0 {
            return Err(invalid(KIND, "mean must have at least 1 entry"));
        }
        if n_components == 0 {
            return Err(invalid(KIND, "components must have at least 1 row"));
        }
        check_finite(KIND, "mean", &schema.mean)?;

        let mut flat = Vec::with_capacity(n_components * n_features);
        for (idx, row) in schema.components.iter().enumerate() {
            let field = format!("components[{idx}]");
            check_len(KIND, &field, row, n_features)?;
            check_finite(KIND, &field, row)?;
            flat.extend_from_slice(row);
        }
        let components = Array2::from_shape_vec((n_components, n_features), flat)
            .map_err(|e| invalid(KIND, e))?;

        let pca = Pca::new(Array1::from(schema.mean), components);
        if !schema.whiten {
            return Ok(pca);
        }

        let variance = schema
            .explained_variance
            .ok_or_else(|| invalid(KIND, "whiten requires explained_variance"))?;
        check_len(KIND, "explained_variance", &variance, n_components)?;
        check_finite(KIND, "explained_variance", &variance)?;
        check_positive(KIND, "explained_variance", &variance)?;
        Ok(pca.whitened(Array1::from(variance)))
    }
}

impl From<&Pca> for PcaSchema {
    fn from(pca: &Pca) -> Self {
        Self {
            mean: pca.mean().to_vec(),
            components: pca.components().rows().into_iter().map(|r| r.to_vec()).collect(),
            explained_variance: pca.explained_variance().map(|v| v.to_vec()),
            whiten: pca.is_whitened(),
        }
    }
}

// =============================================================================
// LogisticRegression
// =============================================================================

impl TryFrom<LogisticRegressionSchema> for LogisticRegression {
    type Error = ReadError;

    fn try_from(schema: LogisticRegressionSchema) -> Result<Self, Self::Error> {
        const KIND: &str = LogisticRegressionSchema::KIND;

        let [coef] = <[Vec<f64>; 1]>::try_from(schema.coef).map_err(|rows| {
            invalid(
                KIND,
                format_args!("binary model expected, coef has {} rows", rows.len()),
            )
        })?;
        if coef.is_empty() {
            return Err(invalid(KIND, "coef must have at least 1 entry"));
        }
        check_finite(KIND, "coef", &coef)?;

        check_len(KIND, "intercept", &schema.intercept, 1)?;
        check_finite(KIND, "intercept", &schema.intercept)?;

        if let Some(classes) = &schema.classes {
            if classes.len() != 2 {
                return Err(invalid(
                    KIND,
                    format_args!("binary model expected, got {} classes", classes.len()),
                ));
            }
        }

        Ok(LogisticRegression::new(Array1::from(coef), schema.intercept[0]))
    }
}

impl From<&LogisticRegression> for LogisticRegressionSchema {
    fn from(model: &LogisticRegression) -> Self {
        Self {
            coef: vec![model.coef().to_vec()],
            intercept: vec![model.intercept()],
            classes: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;

    fn scaler_schema() -> ScalerSchema {
        ScalerSchema {
            n_features_in: 2,
            mean: Some(vec![1.0, 2.0]),
            scale: Some(vec![0.5, 1.0]),
            feature_names: None,
        }
    }

    fn pca_schema() -> PcaSchema {
        PcaSchema {
            mean: vec![0.0, 0.0],
            components: vec![vec![1.0, 0.0]],
            explained_variance: Some(vec![2.0]),
            whiten: false,
        }
    }

    fn logistic_schema() -> LogisticRegressionSchema {
        LogisticRegressionSchema {
            coef: vec![vec![0.5, -0.5]],
            intercept: vec![0.1],
            classes: Some(vec![0.into(), 1.into()]),
        }
    }

    fn assert_validation(err: ReadError, needle: &str) {
        match err {
            ReadError::Validation(msg) => assert!(msg.contains(needle), "message: {msg}"),
            other => panic!("expected validation error, got {other:?}"),
        }
    }

    // =========================================================================
    // Scaler
    // =========================================================================

    #[test]
    fn scaler_from_schema() {
        let scaler = StandardScaler::try_from(scaler_schema()).unwrap();
        assert_eq!(scaler, StandardScaler::new(array![1.0, 2.0], array![0.5, 1.0]));
    }

    #[test]
    fn scaler_rejects_zero_scale() {
        let mut schema = scaler_schema();
        schema.scale = Some(vec![0.0, 1.0]);
        assert_validation(StandardScaler::try_from(schema).unwrap_err(), "scale[0] must be positive");
    }

    #[test]
    fn scaler_rejects_length_mismatch() {
        let mut schema = scaler_schema();
        schema.mean = Some(vec![1.0]);
        assert_validation(StandardScaler::try_from(schema).unwrap_err(), "mean has 1 entries");
    }

    #[test]
    fn scaler_rejects_nan() {
        let mut schema = scaler_schema();
        schema.mean = Some(vec![1.0, f64::NAN]);
        assert_validation(StandardScaler::try_from(schema).unwrap_err(), "mean[1] is not finite");
    }

    #[test]
    fn scaler_rejects_name_count_mismatch() {
        let mut schema = scaler_schema();
        schema.feature_names = Some(vec!["a".into()]);
        assert_validation(StandardScaler::try_from(schema).unwrap_err(), "feature_names");
    }

    #[test]
    fn scaler_rejects_zero_width() {
        let schema = ScalerSchema {
            n_features_in: 0,
            mean: None,
            scale: None,
            feature_names: None,
        };
        assert_validation(StandardScaler::try_from(schema).unwrap_err(), "n_features_in");
    }

    // =========================================================================
    // Pca
    // =========================================================================

    #[test]
    fn pca_without_whitening_drops_variance() {
        let pca = Pca::try_from(pca_schema()).unwrap();
        assert!(!pca.is_whitened());
        assert_eq!(pca.n_components(), 1);
    }

    #[test]
    fn pca_whitening_requires_variance() {
        let mut schema = pca_schema();
        schema.whiten = true;
        schema.explained_variance = None;
        assert_validation(Pca::try_from(schema).unwrap_err(), "whiten requires");
    }

    #[test]
    fn pca_whitening_rejects_zero_variance() {
        let mut schema = pca_schema();
        schema.whiten = true;
        schema.explained_variance = Some(vec![0.0]);
        assert_validation(Pca::try_from(schema).unwrap_err(), "must be positive");
    }

    #[test]
    fn pca_rejects_ragged_components() {
        let mut schema = pca_schema();
        schema.components = vec![vec![1.0, 0.0], vec![0.0]];
        assert_validation(Pca::try_from(schema).unwrap_err(), "components[1] has 1 entries");
    }

    #[test]
    fn pca_rejects_empty_components() {
        let mut schema = pca_schema();
        schema.components.clear();
        assert_validation(Pca::try_from(schema).unwrap_err(), "at least 1 row");
    }

    #[test]
    fn pca_schema_roundtrip_keeps_whitening() {
        let pca = Pca::new(array![0.5, 0.5], array![[0.6, 0.8]]).whitened(array![3.0]);
        let restored = Pca::try_from(PcaSchema::from(&pca)).unwrap();
        assert_eq!(restored, pca);
    }

    // =========================================================================
    // LogisticRegression
    // =========================================================================

    #[test]
    fn logistic_from_schema() {
        let model = LogisticRegression::try_from(logistic_schema()).unwrap();
        assert_eq!(model, LogisticRegression::new(array![0.5, -0.5], 0.1));
    }

    #[test]
    fn logistic_rejects_multiclass_coef() {
        let mut schema = logistic_schema();
        schema.coef = vec![vec![1.0], vec![2.0], vec![3.0]];
        assert_validation(
            LogisticRegression::try_from(schema).unwrap_err(),
            "coef has 3 rows",
        );
    }

    #[test]
    fn logistic_rejects_extra_classes() {
        let mut schema = logistic_schema();
        schema.classes = Some(vec![0.into(), 1.into(), 2.into()]);
        assert_validation(LogisticRegression::try_from(schema).unwrap_err(), "3 classes");
    }

    #[test]
    fn logistic_rejects_missing_intercept() {
        let mut schema = logistic_schema();
        schema.intercept.clear();
        assert_validation(
            LogisticRegression::try_from(schema).unwrap_err(),
            "intercept has 0 entries",
        );
    }
}
