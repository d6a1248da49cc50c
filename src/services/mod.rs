pub mod analytics;
pub mod seeder;
