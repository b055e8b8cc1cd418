//! Preprocessing and model artifacts produced by the offline training run.
//!
//! Three files live in the models directory:
//!
//! * `crop_model.onnx` - the classifier, taking a `float32[1, 7]` input
//! * `scaler.json` - standardization parameters, `{"mean": [..], "scale": [..]}`,
//!   optionally with the fitted column names under `"features"`
//! * `label_encoder.json` - class names indexed by label id, `{"classes": [..]}`

use std::fs;
use std::panic::{self, AssertUnwindSafe};
use std::path::Path;

use ndarray::Array1;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use tract_onnx::prelude::*;

use crate::error::{ArtifactError, PredictError};
use crate::features::{FeatureVector, FEATURE_COUNT, FEATURE_NAMES};

pub const CLASSIFIER_FILE: &str = "crop_model.onnx";
pub const SCALER_FILE: &str = "scaler.json";
pub const LABEL_ENCODER_FILE: &str = "label_encoder.json";

pub trait Scaler: Send + Sync {
    fn transform(&self, features: &FeatureVector) -> Result<Array1<f64>, PredictError>;
}

pub trait Classifier: Send + Sync {
    /// Encoded label id for one scaled sample.
    fn classify(&self, scaled: &Array1<f64>) -> Result<i64, PredictError>;
}

pub trait LabelDecoder: Send + Sync {
    fn decode(&self, label: i64) -> Result<String, PredictError>;
}

/// The loaded scaler, classifier and label encoder. Immutable once built.
pub struct Artifacts {
    scaler: Box<dyn Scaler>,
    classifier: Box<dyn Classifier>,
    decoder: Box<dyn LabelDecoder>,
}

impl Artifacts {
    pub fn new(
        scaler: impl Scaler + 'static,
        classifier: impl Classifier + 'static,
        decoder: impl LabelDecoder + 'static,
    ) -> Self {
        Artifacts {
            scaler: Box::new(scaler),
            classifier: Box::new(classifier),
            decoder: Box::new(decoder),
        }
    }

    /// Loads all three artifacts from `dir`. The first failure wins.
    pub fn load(dir: &Path) -> Result<Self, ArtifactError> {
        let classifier = OnnxClassifier::load(&dir.join(CLASSIFIER_FILE))?;
        let scaler = StandardScaler::load(&dir.join(SCALER_FILE))?;
        let decoder = LabelEncoder::load(&dir.join(LABEL_ENCODER_FILE))?;
        Ok(Artifacts::new(scaler, classifier, decoder))
    }

    /// Scale, classify and decode a single sample.
    pub fn infer(&self, features: &FeatureVector) -> Result<String, PredictError> {
        let scaled = self.scaler.transform(features)?;
        let label = self.classifier.classify(&scaled)?;
        self.decoder.decode(label)
    }
}

fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T, ArtifactError> {
    let bytes = fs::read(path).map_err(|source| ArtifactError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    serde_json::from_slice(&bytes).map_err(|source| ArtifactError::Parse {
        path: path.to_path_buf(),
        source,
    })
}

#[derive(Deserialize)]
struct ScalerFile {
    /// Column names the scaler was fitted on, when the export recorded them.
    #[serde(default)]
    features: Option<Vec<String>>,
    mean: Vec<f64>,
    scale: Vec<f64>,
}

/// Standardization: `(x - mean) / scale`, column-wise.
#[derive(Debug, Clone)]
pub struct StandardScaler {
    mean: Array1<f64>,
    scale: Array1<f64>,
}

impl StandardScaler {
    pub fn new(mean: Vec<f64>, scale: Vec<f64>) -> Self {
        // constant columns were fitted with a zero scale; leave them unscaled
        let scale = scale
            .into_iter()
            .map(|s| if s == 0.0 { 1.0 } else { s })
            .collect();
        StandardScaler {
            mean: Array1::from(mean),
            scale,
        }
    }

    pub fn load(path: &Path) -> Result<Self, ArtifactError> {
        let file: ScalerFile = read_json(path)?;
        if let Some(features) = &file.features {
            if !features.iter().map(String::as_str).eq(FEATURE_NAMES) {
                return Err(ArtifactError::FeatureOrder {
                    path: path.to_path_buf(),
                    expected: FEATURE_NAMES.join(", "),
                    found: features.join(", "),
                });
            }
        }
        for (field, values) in [("mean", &file.mean), ("scale", &file.scale)] {
            if values.len() != FEATURE_COUNT {
                return Err(ArtifactError::Shape {
                    path: path.to_path_buf(),
                    field,
                    expected: FEATURE_COUNT,
                    found: values.len(),
                });
            }
        }
        Ok(StandardScaler::new(file.mean, file.scale))
    }
}

impl Scaler for StandardScaler {
    fn transform(&self, features: &FeatureVector) -> Result<Array1<f64>, PredictError> {
        let raw = features.as_array();
        if raw.len() != self.mean.len() || raw.len() != self.scale.len() {
            return Err(PredictError::Transform(format!(
                "scaler expects {} features, got {}",
                self.mean.len(),
                raw.len()
            )));
        }
        Ok((raw - &self.mean) / &self.scale)
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct LabelEncoder {
    classes: Vec<String>,
}

impl LabelEncoder {
    pub fn new(classes: Vec<String>) -> Self {
        LabelEncoder { classes }
    }

    pub fn load(path: &Path) -> Result<Self, ArtifactError> {
        read_json(path)
    }
}

impl LabelDecoder for LabelEncoder {
    fn decode(&self, label: i64) -> Result<String, PredictError> {
        usize::try_from(label)
            .ok()
            .and_then(|index| self.classes.get(index))
            .cloned()
            .ok_or_else(|| {
                PredictError::Transform(format!(
                    "label {label} is not one of the {} known classes",
                    self.classes.len()
                ))
            })
    }
}

pub struct OnnxClassifier {
    model: TypedRunnableModel<TypedModel>,
}

impl OnnxClassifier {
    pub fn load(path: &Path) -> Result<Self, ArtifactError> {
        let model_error = |err: TractError| ArtifactError::Model {
            path: path.to_path_buf(),
            message: err.to_string(),
        };

        if !path.is_file() {
            return Err(ArtifactError::Io {
                path: path.to_path_buf(),
                source: std::io::Error::new(std::io::ErrorKind::NotFound, "no such file"),
            });
        }

        // tract unwraps on some malformed graphs (e.g. an untyped input)
        let built = panic::catch_unwind(AssertUnwindSafe(|| {
            tract_onnx::onnx()
                .model_for_path(path)?
                .with_input_fact(0, f32::fact([1, FEATURE_COUNT]).into())?
                .into_optimized()?
                .into_runnable()
        }));

        match built {
            Ok(model) => Ok(OnnxClassifier {
                model: model.map_err(model_error)?,
            }),
            Err(_) => Err(ArtifactError::Model {
                path: path.to_path_buf(),
                message: "model loader panicked".to_string(),
            }),
        }
    }
}

impl Classifier for OnnxClassifier {
    fn classify(&self, scaled: &Array1<f64>) -> Result<i64, PredictError> {
        let transform_error = |err: TractError| PredictError::Transform(err.to_string());

        let input: Vec<f32> = scaled.iter().map(|&v| v as f32).collect();
        let tensor = Tensor::from_shape(&[1, input.len()], &input).map_err(transform_error)?;
        let outputs = self
            .model
            .run(tvec!(tensor.into()))
            .map_err(transform_error)?;
        let output = outputs
            .first()
            .ok_or_else(|| PredictError::Transform("classifier produced no output".to_string()))?;

        label_from_output(output)
    }
}

/// Reads the label id from the classifier's first output: integer tensors hold
/// the label directly, float tensors hold per-class scores.
fn label_from_output(output: &Tensor) -> Result<i64, PredictError> {
    let transform_error = |err: TractError| PredictError::Transform(err.to_string());
    let empty = || PredictError::Transform("classifier output is empty".to_string());

    match output.datum_type() {
        DatumType::I64 => output
            .as_slice::<i64>()
            .map_err(transform_error)?
            .first()
            .copied()
            .ok_or_else(empty),
        DatumType::I32 => output
            .as_slice::<i32>()
            .map_err(transform_error)?
            .first()
            .map(|&label| i64::from(label))
            .ok_or_else(empty),
        DatumType::F32 => output
            .as_slice::<f32>()
            .map_err(transform_error)?
            .iter()
            .enumerate()
            .max_by(|(_, a), (_, b)| a.total_cmp(b))
            .map(|(index, _)| index as i64)
            .ok_or_else(empty),
        other => Err(PredictError::Transform(format!(
            "unsupported classifier output type {other:?}"
        ))),
    }
}
