//! ONNX sentence-transformer embeddings
//!
//! Runs `sentence-transformers/all-MiniLM-L6-v2` (or another model exported
//! the same way) locally with mean pooling and L2 normalization. Model and
//! tokenizer are downloaded into the cache directory on first use.

use async_trait::async_trait;
use ort::session::{builder::GraphOptimizationLevel, Session};
use ort::value::Tensor;
use parking_lot::Mutex;
use std::path::Path;
use std::sync::Arc;
use tokenizers::Tokenizer;

use super::embedding::EmbeddingProvider;
use crate::config::EmbeddingConfig;
use crate::error::{Error, Result};

/// Loaded model; inference needs exclusive access to the session
struct OnnxModel {
    session: Session,
    tokenizer: Tokenizer,
    dimensions: usize,
    max_length: usize,
}

/// ONNX-based text embedder
pub struct OnnxEmbedder {
    model: Arc<Mutex<OnnxModel>>,
    dimensions: usize,
    batch_size: usize,
}

impl OnnxEmbedder {
    /// Load (downloading if needed) the configured model
    pub async fn new(config: &EmbeddingConfig) -> Result<Self> {
        tracing::info!("Initializing ONNX embedder with model: {}", config.model);

        let model_dir = config.cache_dir.join(&config.model);
        std::fs::create_dir_all(&model_dir).map_err(|e| {
            Error::Config(format!("Failed to create cache directory: {}", e))
        })?;

        let model_path = model_dir.join("model.onnx");
        let tokenizer_path = model_dir.join("tokenizer.json");

        if !model_path.exists() {
            download(&config.model, "onnx/model.onnx", &model_path).await?;
        }
        if !tokenizer_path.exists() {
            download(&config.model, "tokenizer.json", &tokenizer_path).await?;
        }

        let session = Session::builder()
            .map_err(|e| Error::embedding(format!("Failed to create session builder: {}", e)))?
            .with_optimization_level(GraphOptimizationLevel::Level3)
            .map_err(|e| Error::embedding(format!("Failed to set optimization level: {}", e)))?
            .with_intra_threads(4)
            .map_err(|e| Error::embedding(format!("Failed to set threads: {}", e)))?
            .commit_from_file(&model_path)
            .map_err(|e| Error::embedding(format!("Failed to load model: {}", e)))?;

        let tokenizer = Tokenizer::from_file(&tokenizer_path)
            .map_err(|e| Error::embedding(format!("Failed to load tokenizer: {}", e)))?;

        tracing::info!("ONNX embedder initialized");

        Ok(Self {
            model: Arc::new(Mutex::new(OnnxModel {
                session,
                tokenizer,
                dimensions: config.dimensions,
                max_length: config.max_length,
            })),
            dimensions: config.dimensions,
            batch_size: config.batch_size,
        })
    }

    async fn run(&self, texts: Vec<String>) -> Result<Vec<Vec<f32>>> {
        let model = Arc::clone(&self.model);
        let batch_size = self.batch_size;

        tokio::task::spawn_blocking(move || {
            let mut model = model.lock();
            let mut all = Vec::with_capacity(texts.len());
            for batch in texts.chunks(batch_size) {
                all.extend(model.embed_batch(batch)?);
            }
            Ok(all)
        })
        .await
        .map_err(|e| Error::internal(format!("Task join error: {}", e)))?
    }
}

impl OnnxModel {
    fn embed_batch(&mut self, texts: &[String]) -> Result<Vec<Vec<f32>>> {
        let batch_size = texts.len();
        if batch_size == 0 {
            return Ok(Vec::new());
        }

        let encodings = self
            .tokenizer
            .encode_batch(texts.to_vec(), true)
            .map_err(|e| Error::embedding(format!("Tokenization failed: {}", e)))?;

        let max_len = encodings
            .iter()
            .map(|e| e.get_ids().len())
            .max()
            .unwrap_or(0)
            .min(self.max_length);

        let mut input_ids = vec![0i64; batch_size * max_len];
        let mut attention_mask = vec![0i64; batch_size * max_len];
        let mut token_type_ids = vec![0i64; batch_size * max_len];

        for (i, encoding) in encodings.iter().enumerate() {
            let ids = encoding.get_ids();
            let mask = encoding.get_attention_mask();
            let types = encoding.get_type_ids();

            for j in 0..ids.len().min(max_len) {
                input_ids[i * max_len + j] = ids[j] as i64;
                attention_mask[i * max_len + j] = mask[j] as i64;
                token_type_ids[i * max_len + j] = types[j] as i64;
            }
        }

        let shape = vec![batch_size, max_len];
        let input_ids_tensor = Tensor::from_array((shape.clone(), input_ids.into_boxed_slice()))
            .map_err(|e| Error::embedding(format!("Input tensor creation failed: {}", e)))?;
        let attention_mask_tensor =
            Tensor::from_array((shape.clone(), attention_mask.clone().into_boxed_slice()))
                .map_err(|e| Error::embedding(format!("Attention mask tensor creation failed: {}", e)))?;
        let token_type_ids_tensor =
            Tensor::from_array((shape, token_type_ids.into_boxed_slice()))
                .map_err(|e| Error::embedding(format!("Token type tensor creation failed: {}", e)))?;

        let inputs = vec![
            ("input_ids", input_ids_tensor.into_dyn()),
            ("attention_mask", attention_mask_tensor.into_dyn()),
            ("token_type_ids", token_type_ids_tensor.into_dyn()),
        ];

        let outputs = self
            .session
            .run(inputs)
            .map_err(|e| Error::embedding(format!("Inference failed: {}", e)))?;

        let output_iter: Vec<_> = outputs.iter().collect();
        let output = output_iter
            .iter()
            .find(|(name, _)| *name == "last_hidden_state")
            .or_else(|| output_iter.first())
            .map(|(_, v)| v)
            .ok_or_else(|| Error::embedding("No output tensor"))?;

        let (tensor_shape, tensor_data) = output
            .try_extract_tensor::<f32>()
            .map_err(|e| Error::embedding(format!("Failed to extract tensor: {}", e)))?;

        let dims: Vec<usize> = tensor_shape.iter().map(|&d| d as usize).collect();
        let hidden_size = dims.get(2).copied().unwrap_or(self.dimensions);

        let mut embeddings = Vec::with_capacity(batch_size);
        for i in 0..batch_size {
            let mut sum = vec![0.0f32; hidden_size];
            let mut count = 0.0f32;

            for j in 0..max_len {
                let mask_val = attention_mask[i * max_len + j] as f32;
                if mask_val > 0.0 {
                    for (k, slot) in sum.iter_mut().enumerate() {
                        let idx = i * max_len * hidden_size + j * hidden_size + k;
                        if let Some(value) = tensor_data.get(idx) {
                            *slot += value * mask_val;
                        }
                    }
                    count += mask_val;
                }
            }

            if count > 0.0 {
                for val in &mut sum {
                    *val /= count;
                }
            }

            let norm: f32 = sum.iter().map(|x| x * x).sum::<f32>().sqrt();
            if norm > 0.0 {
                for val in &mut sum {
                    *val /= norm;
                }
            }

            embeddings.push(sum);
        }

        Ok(embeddings)
    }
}

#[async_trait]
impl EmbeddingProvider for OnnxEmbedder {
    async fn embed(&self, text: &str) -> Result<Vec<f32>> {
        self.run(vec![text.to_string()])
            .await?
            .into_iter()
            .next()
            .ok_or_else(|| Error::embedding("Empty embedding result"))
    }

    async fn embed_batch(&self, texts: &[String]) -> Result<Vec<Vec<f32>>> {
        self.run(texts.to_vec()).await
    }

    fn dimensions(&self) -> usize {
        self.dimensions
    }

    fn name(&self) -> &str {
        "onnx"
    }
}

/// Download one file of a sentence-transformers repository
async fn download(model_name: &str, file: &str, path: &Path) -> Result<()> {
    let url = format!(
        "https://huggingface.co/sentence-transformers/{}/resolve/main/{}",
        model_name, file
    );

    tracing::info!("Downloading {}", url);

    let response = reqwest::get(&url)
        .await
        .map_err(|e| Error::embedding(format!("Failed to download {}: {}", file, e)))?;

    if !response.status().is_success() {
        return Err(Error::embedding(format!(
            "Download of {} failed: HTTP {}",
            file,
            response.status()
        )));
    }

    let bytes = response
        .bytes()
        .await
        .map_err(|e| Error::embedding(format!("Failed to read {}: {}", file, e)))?;

    tokio::fs::write(path, &bytes).await?;

    tracing::info!("Downloaded {} ({} bytes)", file, bytes.len());

    Ok(())
}
