pub mod device_state;
pub mod priority;
pub mod work_order_status;
pub mod work_type;

pub use device_state::DeviceState;
pub use priority::Priority;
pub use work_order_status::WorkOrderStatus;
pub use work_type::WorkType;
