pub mod mysql_client;
