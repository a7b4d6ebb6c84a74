pub mod queue_entry;
pub mod work_record;
pub mod work_status;
