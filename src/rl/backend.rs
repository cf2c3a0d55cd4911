//! Burn backend alias and tensor export of observations
//!
//! Learning loops built on Burn consume observations as tensors. The
//! environment itself stays tensor-free; these helpers convert at the seam.
//!
//! # Example
//!
//! ```rust
//! use grid_snake::game::GameConfig;
//! use grid_snake::rl::{observation_tensor, default_device, InferenceBackend, SnakeEnvironment};
//!
//! let mut env = SnakeEnvironment::with_seed(GameConfig::default(), 1).unwrap();
//! let (obs, _) = env.reset(None);
//! let tensor = observation_tensor::<InferenceBackend>(&obs, &default_device());
//! assert_eq!(tensor.shape().dims, [9]);
//! ```

use burn::backend::ndarray::{NdArray, NdArrayDevice};
use burn::tensor::{Tensor, TensorData, backend::Backend};

use super::observation::{OBSERVATION_SIZE, Observation};

/// CPU backend for consuming observations outside of training
pub type InferenceBackend = NdArray<f32>;

/// Get the default device for computation
pub fn default_device() -> NdArrayDevice {
    NdArrayDevice::default()
}

/// Convert one observation into a rank-1 tensor of shape [9]
pub fn observation_tensor<B: Backend>(obs: &Observation, device: &B::Device) -> Tensor<B, 1> {
    let data = TensorData::new(obs.to_vec(), [OBSERVATION_SIZE]);
    Tensor::<B, 1>::from_data(data, device)
}

/// Stack observations into a batch tensor of shape [batch, 9]
pub fn observations_tensor<B: Backend>(obs: &[Observation], device: &B::Device) -> Tensor<B, 2> {
    let flat: Vec<f32> = obs.iter().flat_map(|o| o.as_slice().iter().copied()).collect();
    let data = TensorData::new(flat, [obs.len(), OBSERVATION_SIZE]);
    Tensor::<B, 2>::from_data(data, device)
}
