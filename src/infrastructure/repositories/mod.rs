pub mod in_memory_plan_repository;

pub use in_memory_plan_repository::InMemoryPlanRepository;
