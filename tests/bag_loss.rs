use attitude_cnn::{
    network::{Batch, Mode, VanillaCnn},
    ModelConfig,
};
use ndarray::{array, Array1, Array2};
use rand::{rngs::StdRng, SeedableRng};

// One channel reading the word embedding, two classes scored as [g, -g].
fn model() -> VanillaCnn {
    let config = ModelConfig {
        vocabulary_words: 3,
        embedding_size: 1,
        words_per_news: 2,
        bags_per_batch: 2,
        bag_size: 2,
        channels_count: 1,
        window_size: 1,
        n_out: 2,
        dropout: 1.0,
        ..ModelConfig::default()
    };
    VanillaCnn::from_parts(
        config,
        array![[1.0], [0.0], [0.0]],
        array![[1.0, -1.0]],
        array![0.0, 0.0],
    )
    .unwrap()
}

fn batch(model: &VanillaCnn, tokens: [usize; 4]) -> Batch {
    let x = Array2::from_shape_fn((4, 2), |(row, _)| tokens[row]);
    Batch::new(
        model.config(),
        x,
        Array2::zeros((4, 2)),
        Array2::zeros((4, 2)),
        Array1::zeros(4),
        Array1::zeros(4),
        Array1::zeros(4),
    )
    .unwrap()
}

fn expected_loss(value: f32) -> f32 {
    (1.0 + (-2.0 * value.tanh()).exp()).ln()
}

#[test]
fn bag_cost_is_the_hardest_instance() {
    let model = model();
    let embedding = array![[2.0f32], [-2.0], [0.0]];
    let mut rng = StdRng::seed_from_u64(0);
    let out = model
        .forward(&batch(&model, [0, 1, 0, 2]), embedding.view(), Mode::Inference, &mut rng)
        .unwrap();

    assert!((out.instance_costs[0] - expected_loss(2.0)).abs() < 1e-5);
    assert!((out.instance_costs[1] - expected_loss(-2.0)).abs() < 1e-5);
    assert!((out.bag_costs[0] - expected_loss(-2.0)).abs() < 1e-5);
    assert!((out.bag_costs[1] - 2.0f32.ln()).abs() < 1e-5);
    let mean = (out.instance_costs[0] + out.instance_costs[1]) / 2.0;
    assert!(out.bag_costs[0] > mean);
    assert_eq!(out.labels.to_vec(), vec![0, 1, 0, 0]);
}

#[test]
fn reordering_samples_moves_them_between_bags() {
    let model = model();
    let embedding = array![[2.0f32], [-2.0], [0.0]];
    let mut rng = StdRng::seed_from_u64(0);
    let ordered = model
        .forward(&batch(&model, [0, 1, 0, 2]), embedding.view(), Mode::Inference, &mut rng)
        .unwrap();
    let permuted = model
        .forward(&batch(&model, [0, 0, 1, 2]), embedding.view(), Mode::Inference, &mut rng)
        .unwrap();

    assert_ne!(ordered.bag_costs, permuted.bag_costs);
    assert!((permuted.bag_costs[0] - expected_loss(2.0)).abs() < 1e-5);
    assert!((permuted.bag_costs[1] - expected_loss(-2.0)).abs() < 1e-5);
}
