pub mod change_role;
