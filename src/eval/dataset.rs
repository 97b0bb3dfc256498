// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! MNIST test split and randomised sampling
//!
//! The whole split is held in memory as raw bytes; `ShuffledSamples` walks a
//! fresh permutation of indices and materialises one sample at a time.

use super::error::{EvalError, EvalResult};
use mnist::MnistBuilder;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;
use std::path::Path;
use tracing::info;

pub const IMAGE_SIDE: usize = 28;
pub const IMAGE_PIXELS: usize = IMAGE_SIDE * IMAGE_SIDE;

/// Files `MnistBuilder` expects under its base path
pub const MNIST_FILES: [&str; 4] = [
    "train-images-idx3-ubyte",
    "train-labels-idx1-ubyte",
    "t10k-images-idx3-ubyte",
    "t10k-labels-idx1-ubyte",
];

/// One grayscale 28x28 image with its ground-truth digit
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Sample {
    pub pixels: Vec<u8>,
    pub label: u8,
}

#[derive(Debug, Clone)]
pub struct SampleSet {
    images: Vec<u8>,
    labels: Vec<u8>,
}

impl SampleSet {
    /// Build from flat image bytes (784 per sample) and one label per sample
    pub fn from_raw(images: Vec<u8>, labels: Vec<u8>) -> EvalResult<Self> {
        if images.len() != labels.len() * IMAGE_PIXELS {
            return Err(EvalError::InvalidDataset {
                reason: format!(
                    "{} image bytes do not match {} labels of {} pixels",
                    images.len(),
                    labels.len(),
                    IMAGE_PIXELS
                ),
            });
        }
        Ok(Self { images, labels })
    }

    /// Load the MNIST test split from the IDX files in `dir`
    pub fn load_mnist_test(dir: impl AsRef<Path>) -> EvalResult<Self> {
        let dir = dir.as_ref();
        for file in MNIST_FILES {
            let path = dir.join(file);
            if !path.exists() {
                return Err(EvalError::DatasetNotFound { path });
            }
        }

        let base_path = dir.to_str().ok_or_else(|| EvalError::InvalidDataset {
            reason: format!("dataset path {:?} is not valid UTF-8", dir),
        })?;

        let mnist = MnistBuilder::new()
            .label_format_digit()
            .base_path(base_path)
            .finalize();

        let set = Self::from_raw(mnist.tst_img, mnist.tst_lbl)?;
        info!("📚 Loaded {} MNIST test samples from {:?}", set.len(), dir);
        Ok(set)
    }

    pub fn len(&self) -> usize {
        self.labels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<Sample> {
        let label = *self.labels.get(index)?;
        let start = index * IMAGE_PIXELS;
        let pixels = self.images.get(start..start + IMAGE_PIXELS)?.to_vec();
        Some(Sample { pixels, label })
    }

    /// Lazy random walk over at most `max_samples` samples
    ///
    /// Every call draws a new permutation unless `seed` is given.
    pub fn shuffled(&self, max_samples: usize, seed: Option<u64>) -> ShuffledSamples<'_> {
        let mut order: Vec<usize> = (0..self.len()).collect();
        match seed {
            Some(seed) => order.shuffle(&mut StdRng::seed_from_u64(seed)),
            None => order.shuffle(&mut rand::thread_rng()),
        }
        order.truncate(max_samples);

        ShuffledSamples {
            set: self,
            order: order.into_iter(),
        }
    }
}

pub struct ShuffledSamples<'a> {
    set: &'a SampleSet,
    order: std::vec::IntoIter<usize>,
}

impl Iterator for ShuffledSamples<'_> {
    type Item = Sample;

    fn next(&mut self) -> Option<Sample> {
        let index = self.order.next()?;
        self.set.get(index)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.order.size_hint()
    }
}

impl ExactSizeIterator for ShuffledSamples<'_> {}
