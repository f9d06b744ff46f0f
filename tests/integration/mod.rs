mod helpers;
mod test_info;
mod test_push;
mod test_release;
mod test_rollback;
