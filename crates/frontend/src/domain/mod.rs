pub mod a001_company;
pub mod a002_contractor;
pub mod a003_form;
pub mod a004_template;
pub mod a005_invitation_code;
