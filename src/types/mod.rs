pub mod person_form;
