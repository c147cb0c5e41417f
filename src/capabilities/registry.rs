use super::core::CapabilityHandler;
use crate::models::Capability;
use std::collections::HashMap;
use std::sync::Arc;

/// Registry for managing capability handlers.
///
/// Capabilities are registered at initialization and looked up by endpoint.
/// The listing order seen by clients is the registration order, so
/// `register_builtins` is the single place that fixes it.
pub struct CapabilityRegistry {
    handlers: Vec<Arc<dyn CapabilityHandler>>,
    by_endpoint: HashMap<&'static str, usize>,
}

impl CapabilityRegistry {
    /// Create a new registry with all built-in capabilities registered.
    pub fn new() -> Self {
        let mut registry = Self {
            handlers: Vec::new(),
            by_endpoint: HashMap::new(),
        };

        registry.register_builtins();

        registry
    }

    /// Register a capability handler.
    pub fn register(&mut self, handler: Arc<dyn CapabilityHandler>) {
        let endpoint = handler.endpoint();
        self.by_endpoint.insert(endpoint, self.handlers.len());
        self.handlers.push(handler);
    }

    /// Get a capability handler by endpoint.
    pub fn get(&self, endpoint: &str) -> Option<Arc<dyn CapabilityHandler>> {
        self.by_endpoint
            .get(endpoint)
            .map(|&idx| self.handlers[idx].clone())
    }

    /// Handlers in listing order.
    pub fn iter(&self) -> impl Iterator<Item = &Arc<dyn CapabilityHandler>> {
        self.handlers.iter()
    }

    /// The capability listing served to clients, in registration order.
    pub fn descriptors(&self) -> Vec<Capability> {
        self.handlers.iter().map(|h| h.descriptor()).collect()
    }

    pub fn len(&self) -> usize {
        self.handlers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.handlers.is_empty()
    }

    /// Register all built-in capabilities.
    fn register_builtins(&mut self) {
        use super::builtins::*;

        self.register(Arc::new(WordToPdfCapability));
        self.register(Arc::new(PdfToWordCapability));
        self.register(Arc::new(PdfToJpgCapability));
        self.register(Arc::new(JpgToPdfCapability));
        self.register(Arc::new(ImagesToPdfCapability));
        self.register(Arc::new(CompressCapability));
        self.register(Arc::new(MergeCapability));
        self.register(Arc::new(SplitCapability));
        self.register(Arc::new(RotateCapability));
        self.register(Arc::new(ProtectCapability));
        self.register(Arc::new(UnlockCapability));
        self.register(Arc::new(HtmlToPdfCapability));
        self.register(Arc::new(WatermarkCapability));
        self.register(Arc::new(PageNumbersCapability));
        self.register(Arc::new(DeletePagesCapability));
        self.register(Arc::new(ReorderCapability));
    }
}

impl Default for CapabilityRegistry {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::CapabilityKind;

    #[test]
    fn test_registry_initialization() {
        let registry = CapabilityRegistry::new();

        assert_eq!(registry.len(), CapabilityKind::ALL.len());
        for kind in CapabilityKind::ALL {
            assert!(
                registry.get(kind.endpoint()).is_some(),
                "{} should be registered",
                kind.endpoint()
            );
        }
    }

    #[test]
    fn test_capability_lookup() {
        let registry = CapabilityRegistry::new();

        let cap = registry.get("/pdf/merge").unwrap();
        assert_eq!(cap.kind(), CapabilityKind::Merge);
        assert_eq!(cap.name(), "Merge PDF");
        assert_eq!(cap.from_type(), "pdf[]");
    }

    #[test]
    fn test_nonexistent_capability() {
        let registry = CapabilityRegistry::new();
        assert!(registry.get("/pdf/frobnicate").is_none());
    }

    #[test]
    fn test_listing_order_matches_registration() {
        let registry = CapabilityRegistry::new();
        let descriptors = registry.descriptors();

        assert_eq!(descriptors[0].endpoint, "/convert/word-to-pdf");
        assert_eq!(
            descriptors.last().unwrap().endpoint,
            CapabilityKind::Reorder.endpoint()
        );

        let endpoints: Vec<_> = descriptors.iter().map(|c| c.endpoint.as_str()).collect();
        let expected: Vec<_> = CapabilityKind::ALL.iter().map(|k| k.endpoint()).collect();
        assert_eq!(endpoints, expected);
    }

    #[test]
    fn test_descriptors_carry_form_schema() {
        let registry = CapabilityRegistry::new();
        let merge = registry.get("/pdf/merge").unwrap().descriptor();
        assert_eq!(merge.form, CapabilityKind::Merge.form());
    }
}
