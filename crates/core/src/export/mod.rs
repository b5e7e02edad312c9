pub mod transcript_file;
