//! Convenience macros for plugin development.

/// Builds a [`PluginInfo`](crate::registry::PluginInfo).
///
/// # Example
/// ```rust,ignore
/// let info = plugin_info!(
///     id: "use-hook-mock",
///     name: "Use Hook Mock",
///     version: "0.1.0",
///     description: "Swaps hook imports for sibling mocks",
///     order: PluginOrder::Pre
/// );
/// ```
#[macro_export]
macro_rules! plugin_info {
    (
        id: $id:expr,
        name: $name:expr,
        version: $version:expr,
        description: $desc:expr
    ) => {
        $crate::prelude::PluginInfo {
            id: $id.to_string(),
            name: $name.to_string(),
            version: $version.to_string(),
            description: $desc.to_string(),
            order: $crate::prelude::PluginOrder::Normal,
        }
    };
    (
        id: $id:expr,
        name: $name:expr,
        version: $version:expr,
        description: $desc:expr,
        order: $order:expr
    ) => {
        $crate::prelude::PluginInfo {
            id: $id.to_string(),
            name: $name.to_string(),
            version: $version.to_string(),
            description: $desc.to_string(),
            order: $order,
        }
    };
}

#[cfg(test)]
mod tests {
    use crate::prelude::PluginOrder;

    #[test]
    fn test_plugin_info_defaults_to_normal_order() {
        let info = plugin_info!(
            id: "demo",
            name: "Demo",
            version: "1.0.0",
            description: "demo plugin"
        );
        assert_eq!(info.order, PluginOrder::Normal);

        let pre = plugin_info!(
            id: "demo",
            name: "Demo",
            version: "1.0.0",
            description: "demo plugin",
            order: PluginOrder::Pre
        );
        assert_eq!(pre.order, PluginOrder::Pre);
        assert_eq!(pre.id, "demo");
    }
}
