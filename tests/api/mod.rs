mod health_tests;
mod messages_tests;
mod participants_tests;
mod status_tests;
