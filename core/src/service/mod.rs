pub mod dto;
pub mod scoring;
pub mod task_service;
