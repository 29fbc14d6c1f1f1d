use contracts::enums::{Priority, WorkOrderStatus};
use leptos::prelude::*;

/// Badge component with different variants
#[component]
pub fn Badge(
    /// Badge variant: "primary", "success", "warning", "error", "neutral" (default)
    #[prop(optional, into)]
    variant: MaybeProp<String>,
    /// Badge content
    children: Children,
) -> impl IntoView {
    let variant_class = move || match variant.get().as_deref().unwrap_or("neutral") {
        "primary" => "badge--primary",
        "success" => "badge--success",
        "warning" => "badge--warning",
        "error" => "badge--error",
        _ => "badge--neutral",
    };

    view! {
        <span class=move || format!("badge {}", variant_class())>
            {children()}
        </span>
    }
}

/// Work order status with its color
#[component]
pub fn StatusBadge(status: WorkOrderStatus) -> impl IntoView {
    view! {
        <Badge variant=status.badge_variant().to_string()>
            {status.display_name()}
        </Badge>
    }
}

#[component]
pub fn PriorityBadge(priority: Priority) -> impl IntoView {
    let variant = match priority {
        Priority::Low => "neutral",
        Priority::Medium => "primary",
        Priority::High => "warning",
        Priority::Critical => "error",
    };
    view! {
        <Badge variant=variant.to_string()>
            {priority.display_name()}
        </Badge>
    }
}
