//! Plugin traits and the exported declaration

/// Symbol holding the required [`PluginDeclaration`]
pub const ENTRY_SYMBOL: &str = "Plugin";
/// Optional `&'static str` symbol with the plugin name
pub const NAME_SYMBOL: &str = "Name";
/// Optional `&'static str` symbol with the plugin description
pub const DESCRIPTION_SYMBOL: &str = "Description";
/// Optional `&'static str` symbol with the plugin version
pub const VERSION_SYMBOL: &str = "Version";

/// Name used when a library exports none
pub const DEFAULT_NAME: &str = "Untitled";
/// Description used when a library exports none
pub const DEFAULT_DESCRIPTION: &str = "";
/// Version used when a library exports none
pub const DEFAULT_VERSION: &str = "0.0.0";

/// Tag at the start of every declaration ("WOXP")
pub const PLUGIN_MAGIC: u32 = 0x574F_5850;
/// Layout version of [`PluginDeclaration`]
pub const ABI_VERSION: u32 = 1;
/// Compiler that built this crate
pub const RUSTC_VERSION: &str = env!("WOX_RUSTC_VERSION");

/// Entry point capability every plugin provides
///
/// `run` may block forever; the host gives each plugin its own thread.
pub trait Plugin: Send + Sync {
    /// Start the plugin
    fn run(&self);
}

/// What a plugin library exports under [`ENTRY_SYMBOL`]
///
/// The fixed-width tags come first so the host can read them from a foreign
/// symbol, and reject it, before treating it as a declaration.
#[repr(C)]
#[derive(Debug, Clone, Copy)]
pub struct PluginDeclaration {
    /// Always [`PLUGIN_MAGIC`]
    pub magic: u32,
    /// [`ABI_VERSION`] of the `wox-plugin` the library was built against
    pub abi_version: u32,
    /// [`RUSTC_VERSION`] of the compiler the library was built with
    pub rustc_version: &'static str,
    /// Creates the entry point
    pub constructor: fn() -> Box<dyn Plugin>,
}

impl PluginDeclaration {
    /// Declaration for a constructor, stamped with this build's tags
    pub const fn new(constructor: fn() -> Box<dyn Plugin>) -> Self {
        Self {
            magic: PLUGIN_MAGIC,
            abi_version: ABI_VERSION,
            rustc_version: RUSTC_VERSION,
            constructor,
        }
    }

    /// Declaration that builds `P::default()`
    pub const fn of<P: Plugin + Default + 'static>() -> Self {
        Self::new(construct::<P>)
    }

    /// Check that this declaration can be used by the host.
    ///
    /// Returns the reason on mismatch.
    pub fn check(&self) -> std::result::Result<(), String> {
        Self::check_tags(self.magic, self.abi_version)?;
        if self.rustc_version != RUSTC_VERSION {
            return Err(format!(
                "built with {} (host built with {})",
                self.rustc_version, RUSTC_VERSION
            ));
        }
        Ok(())
    }

    /// Check the fixed-width tags alone, as read from a raw symbol
    pub fn check_tags(magic: u32, abi_version: u32) -> std::result::Result<(), String> {
        if magic != PLUGIN_MAGIC {
            return Err(format!("bad magic {:#010x}", magic));
        }
        if abi_version != ABI_VERSION {
            return Err(format!(
                "abi version {} (host expects {})",
                abi_version, ABI_VERSION
            ));
        }
        Ok(())
    }
}

fn construct<P: Plugin + Default + 'static>() -> Box<dyn Plugin> {
    Box::new(P::default())
}

/// Export a plugin type from a `cdylib`.
///
/// The type must implement [`Plugin`] and [`Default`]. Metadata keys are
/// optional but must appear in the order `name`, `description`, `version`.
///
/// ```rust,ignore
/// wox_plugin::export_plugin!(Timer, name = "Timer", version = "1.0.0");
/// ```
#[macro_export]
macro_rules! export_plugin {
    (
        $plugin:ty
        $(, name = $name:expr)?
        $(, description = $description:expr)?
        $(, version = $version:expr)?
        $(,)?
    ) => {
        #[allow(non_upper_case_globals)]
        #[unsafe(no_mangle)]
        pub static Plugin: $crate::PluginDeclaration = $crate::PluginDeclaration::of::<$plugin>();

        $(
            #[allow(non_upper_case_globals)]
            #[unsafe(no_mangle)]
            pub static Name: &str = $name;
        )?

        $(
            #[allow(non_upper_case_globals)]
            #[unsafe(no_mangle)]
            pub static Description: &str = $description;
        )?

        $(
            #[allow(non_upper_case_globals)]
            #[unsafe(no_mangle)]
            pub static Version: &str = $version;
        )?
    };
}
