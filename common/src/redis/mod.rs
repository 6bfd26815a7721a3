pub mod redis_key;
