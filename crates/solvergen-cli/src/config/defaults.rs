pub struct DefaultsConfig {
    pub version: String,
    pub license: String,
    pub directory: String,
    pub tolerance: f64,
    pub lbfgs_memory: usize,
    pub max_iterations: usize,
    pub bind_address: String,
    pub port: u16,
    pub buffer_size: usize,
}

impl Default for DefaultsConfig {
    fn default() -> Self {
        Self {
            version: "0.0.1".to_string(),
            license: "MIT".to_string(),
            directory: "build".to_string(),
            tolerance: 1e-4,
            lbfgs_memory: 10,
            max_iterations: 500,
            bind_address: "127.0.0.1".to_string(),
            port: 3498,
            buffer_size: 4096,
        }
    }
}
