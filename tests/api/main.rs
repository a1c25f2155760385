mod database;
mod health_check;
mod helpers;
