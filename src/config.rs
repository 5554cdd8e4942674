use std::env;

#[derive(Clone)]
pub struct Config {
    pub database_url: String,
    pub port: u16,
    pub max_meetings_per_generation: u32,
}

impl Config {
    pub fn from_env() -> Self {
        Self {
            database_url: env::var("DATABASE_URL").expect("DATABASE_URL must be set"),
            port: env::var("PORT").unwrap_or_else(|_| "3000".to_string()).parse().expect("PORT must be a number"),
            max_meetings_per_generation: env::var("MAX_MEETINGS_PER_GENERATION")
                .unwrap_or_else(|_| "30".to_string())
                .parse()
                .expect("MAX_MEETINGS_PER_GENERATION must be a number"),
        }
    }
}
