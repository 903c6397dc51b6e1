pub mod scripted_client;
