//! Shape-checked batch arrays consumed by the forward pass.

use ndarray::{aview1, s, Array1, Array2, ArrayView1, ArrayView2};

use crate::config::ModelConfig;
use crate::error::{Error, Result};
use crate::network::BagLayout;
use crate::samples::NetworkInput;

/// `batch_size` rows of `words_per_news` tokens, in bag order.
#[derive(Debug, Clone, PartialEq)]
pub struct Batch {
    x: Array2<usize>,
    p1: Array2<f32>,
    p2: Array2<f32>,
    p1_ind: Array1<usize>,
    p2_ind: Array1<usize>,
    y: Array1<usize>,
}

impl Batch {
    /// Validate raw arrays against `config` before any arithmetic happens.
    pub fn new(
        config: &ModelConfig,
        x: Array2<usize>,
        p1: Array2<f32>,
        p2: Array2<f32>,
        p1_ind: Array1<usize>,
        p2_ind: Array1<usize>,
        y: Array1<usize>,
    ) -> Result<Self> {
        let rows = [config.batch_size(), config.words_per_news];
        let expect_2d = |what, actual: &[usize]| {
            if actual != rows {
                Err(Error::shape(what, &rows, actual))
            } else {
                Ok(())
            }
        };
        expect_2d("token indices", x.shape())?;
        expect_2d("first entity distances", p1.shape())?;
        expect_2d("second entity distances", p2.shape())?;
        for (what, array) in [
            ("first entity positions", &p1_ind),
            ("second entity positions", &p2_ind),
            ("labels", &y),
        ] {
            if array.len() != config.batch_size() {
                return Err(Error::shape(what, &[config.batch_size()], array.shape()));
            }
        }
        if let Some(&index) = x.iter().find(|&&i| i >= config.vocabulary_words) {
            return Err(Error::EmbeddingIndexOutOfRange {
                index,
                rows: config.vocabulary_words,
            });
        }
        if let Some(&label) = y.iter().find(|&&l| l >= config.n_out) {
            return Err(Error::LabelOutOfRange {
                label,
                n_out: config.n_out,
            });
        }
        Ok(Self {
            x,
            p1,
            p2,
            p1_ind,
            p2_ind,
            y,
        })
    }

    /// Lay samples out row by row, right-padding windows up to `words_per_news`
    /// with `pad_index` tokens at zero distance.
    pub fn from_inputs(
        config: &ModelConfig,
        inputs: &[NetworkInput],
        labels: &[usize],
        pad_index: usize,
    ) -> Result<Self> {
        BagLayout::for_samples(inputs.len(), config.bag_size)?;
        if labels.len() != inputs.len() {
            return Err(Error::shape("labels", &[inputs.len()], &[labels.len()]));
        }

        let (rows, words) = (inputs.len(), config.words_per_news);
        let mut x = Array2::from_elem((rows, words), pad_index);
        let mut p1 = Array2::<f32>::zeros((rows, words));
        let mut p2 = Array2::<f32>::zeros((rows, words));
        for (row, input) in inputs.iter().enumerate() {
            let len = input.indices.len();
            if len > words
                || input.dist_from_subj.len() != len
                || input.dist_from_obj.len() != len
            {
                return Err(Error::shape(
                    "sample window",
                    &[len, len, len],
                    &[len, input.dist_from_subj.len(), input.dist_from_obj.len()],
                ));
            }
            x.slice_mut(s![row, ..len]).assign(&aview1(&input.indices));
            for (t, (&d1, &d2)) in input
                .dist_from_subj
                .iter()
                .zip(&input.dist_from_obj)
                .enumerate()
            {
                p1[[row, t]] = d1 as f32;
                p2[[row, t]] = d2 as f32;
            }
        }

        Self::new(
            config,
            x,
            p1,
            p2,
            inputs.iter().map(|input| input.subj_ind).collect(),
            inputs.iter().map(|input| input.obj_ind).collect(),
            Array1::from(labels.to_vec()),
        )
    }

    pub fn len(&self) -> usize {
        self.x.nrows()
    }

    pub fn is_empty(&self) -> bool {
        self.x.nrows() == 0
    }

    pub fn words(&self) -> usize {
        self.x.ncols()
    }

    pub fn x(&self) -> ArrayView2<usize> {
        self.x.view()
    }

    pub fn p1(&self) -> ArrayView2<f32> {
        self.p1.view()
    }

    pub fn p2(&self) -> ArrayView2<f32> {
        self.p2.view()
    }

    pub fn p1_ind(&self) -> ArrayView1<usize> {
        self.p1_ind.view()
    }

    pub fn p2_ind(&self) -> ArrayView1<usize> {
        self.p2_ind.view()
    }

    pub fn y(&self) -> ArrayView1<usize> {
        self.y.view()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config() -> ModelConfig {
        ModelConfig {
            vocabulary_words: 10,
            words_per_news: 6,
            window_size: 3,
            bags_per_batch: 1,
            bag_size: 2,
            ..ModelConfig::default()
        }
    }

    fn input(indices: Vec<usize>, subj_ind: usize, obj_ind: usize) -> NetworkInput {
        let size = indices.len();
        NetworkInput {
            indices,
            subj_ind,
            obj_ind,
            dist_from_subj: crate::samples::distance_vector(subj_ind, size),
            dist_from_obj: crate::samples::distance_vector(obj_ind, size),
            pos_indices: vec![0; size],
            nlp_vector: None,
        }
    }

    #[test]
    fn pads_windows_in_row_order() {
        let inputs = [input(vec![4, 5, 6], 1, 2), input(vec![7, 8, 1], 1, 0)];
        let batch = Batch::from_inputs(&config(), &inputs, &[2, 0], 9).unwrap();
        assert_eq!(batch.len(), 2);
        assert_eq!(batch.x().row(0).to_vec(), vec![4, 5, 6, 9, 9, 9]);
        assert_eq!(batch.x().row(1).to_vec(), vec![7, 8, 1, 9, 9, 9]);
        assert_eq!(batch.p1().row(0).to_vec(), vec![2.0, 0.0, 1.0, 0.0, 0.0, 0.0]);
        assert_eq!(batch.p2().row(1).to_vec(), vec![0.0, 1.0, 2.0, 0.0, 0.0, 0.0]);
        assert_eq!(batch.p1_ind().to_vec(), vec![1, 1]);
        assert_eq!(batch.y().to_vec(), vec![2, 0]);
    }

    #[test]
    fn rejects_partial_bags_and_bad_labels() {
        let inputs = [input(vec![1, 2, 3], 1, 2)];
        assert!(matches!(
            Batch::from_inputs(&config(), &inputs, &[0], 0),
            Err(Error::RaggedBags { .. })
        ));
        let inputs = [input(vec![1, 2, 3], 1, 2), input(vec![1, 2, 3], 1, 2)];
        assert_eq!(
            Batch::from_inputs(&config(), &inputs, &[0, 3], 0),
            Err(Error::LabelOutOfRange { label: 3, n_out: 3 })
        );
        assert!(matches!(
            Batch::from_inputs(&config(), &inputs, &[0, 1], 10),
            Err(Error::EmbeddingIndexOutOfRange { index: 10, .. })
        ));
    }

    #[test]
    fn rejects_wrong_row_length() {
        let config = config();
        let err = Batch::new(
            &config,
            Array2::zeros((2, 5)),
            Array2::zeros((2, 6)),
            Array2::zeros((2, 6)),
            Array1::zeros(2),
            Array1::zeros(2),
            Array1::zeros(2),
        )
        .unwrap_err();
        assert!(matches!(err, Error::ShapeMismatch { what: "token indices", .. }));
    }
}
