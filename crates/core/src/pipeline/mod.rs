pub mod pipeline_stage;
pub mod transcribe_upload_use_case;
