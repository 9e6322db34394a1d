//! Optional hand-crafted feature vector attached to an entity pair.

use ndarray::Array1;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(from = "Vec<f32>", into = "Vec<f32>")]
pub struct FeatureVector(Array1<f32>);

impl FeatureVector {
    pub fn as_array(&self) -> &Array1<f32> {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Unit-length copy of the vector; a zero vector is returned as is.
    pub fn normalized(&self) -> Self {
        Self(normalize(&self.0))
    }
}

impl From<Vec<f32>> for FeatureVector {
    fn from(values: Vec<f32>) -> Self {
        Self(Array1::from(values))
    }
}

impl From<FeatureVector> for Vec<f32> {
    fn from(vector: FeatureVector) -> Self {
        vector.0.to_vec()
    }
}

/// Scale `vector` to unit Euclidean norm.
pub fn normalize(vector: &Array1<f32>) -> Array1<f32> {
    let norm = vector.dot(vector).sqrt();
    if norm == 0.0 {
        return vector.clone();
    }
    vector / norm
}
