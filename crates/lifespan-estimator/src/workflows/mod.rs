pub mod lifespan;
