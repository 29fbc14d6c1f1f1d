pub mod a001_work_order;
pub mod a002_installation;
pub mod a003_tenant;
