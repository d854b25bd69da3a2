use bitflags::bitflags;

bitflags! {
    /// Inode attribute flags as exposed by the ext2/ext4 flag ioctls.
    ///
    /// Values match `FS_*_FL` from the kernel uapi; the same word is used
    /// verbatim on the wire to the provider, so these are raw bits, not an
    /// in-memory invention.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct AttrFlags: u32 {
        /// Secure deletion
        const SECRM        = 0x0000_0001;
        /// Undelete
        const UNRM         = 0x0000_0002;
        /// Compress file
        const COMPR        = 0x0000_0004;
        /// Synchronous updates
        const SYNC         = 0x0000_0008;
        /// Immutable file
        const IMMUTABLE    = 0x0000_0010;
        /// Writes may only append
        const APPEND       = 0x0000_0020;
        /// Do not dump file
        const NODUMP       = 0x0000_0040;
        /// Do not update atime
        const NOATIME      = 0x0000_0080;
        /// Compressed dirty file
        const DIRTY        = 0x0000_0100;
        /// One or more compressed clusters
        const COMPRBLK     = 0x0000_0200;
        /// Access raw compressed data
        const NOCOMPR      = 0x0000_0400;
        /// Encrypted inode
        const ENCRYPT      = 0x0000_0800;
        /// Hash-indexed directory
        const INDEX        = 0x0000_1000;
        const IMAGIC       = 0x0000_2000;
        /// File data should be journaled
        const JOURNAL_DATA = 0x0000_4000;
        /// File tail should not be merged
        const NOTAIL       = 0x0000_8000;
        /// Synchronous directory modifications
        const DIRSYNC      = 0x0001_0000;
        /// Top of directory hierarchies
        const TOPDIR       = 0x0002_0000;
        /// Huge file
        const HUGE_FILE    = 0x0004_0000;
        /// Inode uses extents
        const EXTENTS      = 0x0008_0000;
        /// Verity protected inode
        const VERITY       = 0x0010_0000;
        /// Inode used for large EA
        const EA_INODE     = 0x0020_0000;
        /// Do not cow file
        const NOCOW        = 0x0080_0000;
        /// Inode has inline data
        const INLINE_DATA  = 0x1000_0000;
        /// Create with parents projid
        const PROJINHERIT  = 0x2000_0000;
        /// Casefolded directory
        const CASEFOLD     = 0x4000_0000;
    }
}

/// Flags a user may change through the write ioctl. The rest are shown
/// read-only: the kernel or filesystem owns them.
pub const USER_MODIFIABLE: AttrFlags = AttrFlags::SECRM
    .union(AttrFlags::UNRM)
    .union(AttrFlags::COMPR)
    .union(AttrFlags::SYNC)
    .union(AttrFlags::IMMUTABLE)
    .union(AttrFlags::APPEND)
    .union(AttrFlags::NODUMP)
    .union(AttrFlags::NOATIME)
    .union(AttrFlags::JOURNAL_DATA)
    .union(AttrFlags::NOTAIL)
    .union(AttrFlags::DIRSYNC)
    .union(AttrFlags::TOPDIR)
    .union(AttrFlags::NOCOW)
    .union(AttrFlags::PROJINHERIT)
    .union(AttrFlags::CASEFOLD);

/// One known attribute: a single flag bit, its chattr-style letter code and
/// a display label. Catalog order is display order and stays fixed for the
/// process lifetime.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AttrDef {
    pub bit: AttrFlags,
    pub code: char,
    pub label: &'static str,
    pub mutable: bool,
}

impl AttrDef {
    const fn new(bit: AttrFlags, code: char, label: &'static str) -> Self {
        AttrDef {
            bit,
            code,
            label,
            mutable: bit.intersects(USER_MODIFIABLE),
        }
    }
}

/// Full table of attributes this program knows about, in display order.
/// Which of these actually appear in a catalog is decided at startup by the
/// provider's capability probe, not at compile time.
const KNOWN_ATTRS: &[AttrDef] = &[
    AttrDef::new(AttrFlags::SECRM, 's', "Secure deletion"),
    AttrDef::new(AttrFlags::UNRM, 'u', "Undelete"),
    AttrDef::new(AttrFlags::SYNC, 'S', "Synchronous updates"),
    AttrDef::new(AttrFlags::DIRSYNC, 'D', "Synchronous directory updates"),
    AttrDef::new(AttrFlags::IMMUTABLE, 'i', "Immutable"),
    AttrDef::new(AttrFlags::APPEND, 'a', "Append only"),
    AttrDef::new(AttrFlags::NODUMP, 'd', "No dump"),
    AttrDef::new(AttrFlags::NOATIME, 'A', "No update atime"),
    AttrDef::new(AttrFlags::COMPR, 'c', "Compress"),
    AttrDef::new(AttrFlags::COMPRBLK, 'B', "Compressed clusters"),
    AttrDef::new(AttrFlags::DIRTY, 'Z', "Compressed dirty file"),
    AttrDef::new(AttrFlags::NOCOMPR, 'X', "Compression raw access"),
    AttrDef::new(AttrFlags::ENCRYPT, 'E', "Encrypted inode"),
    AttrDef::new(AttrFlags::JOURNAL_DATA, 'j', "Journaled data"),
    AttrDef::new(AttrFlags::INDEX, 'I', "Indexed directory"),
    AttrDef::new(AttrFlags::NOTAIL, 't', "No tail merging"),
    AttrDef::new(AttrFlags::TOPDIR, 'T', "Top of directory hierarchies"),
    AttrDef::new(AttrFlags::EXTENTS, 'e', "Inode uses extents"),
    AttrDef::new(AttrFlags::HUGE_FILE, 'h', "Huge file"),
    AttrDef::new(AttrFlags::NOCOW, 'C', "No COW"),
    AttrDef::new(AttrFlags::CASEFOLD, 'F', "Casefolded directory"),
    AttrDef::new(AttrFlags::INLINE_DATA, 'N', "Inode has inline data"),
    AttrDef::new(AttrFlags::PROJINHERIT, 'P', "Project hierarchy"),
    AttrDef::new(AttrFlags::VERITY, 'V', "Verity protected inode"),
];

/// Placeholder shown in a preview string for an attribute that is not set.
pub const PREVIEW_UNSET: char = '-';

/// Ordered registry of the attributes available on the current target.
///
/// Built once per command invocation from whatever the provider probe
/// reports as supported; never mutated afterwards.
#[derive(Debug, Clone)]
pub struct Catalog {
    defs: Vec<AttrDef>,
}

impl Catalog {
    /// Catalog restricted to the bits in `supported`.
    pub fn supported(supported: AttrFlags) -> Self {
        let defs = KNOWN_ATTRS
            .iter()
            .filter(|d| supported.contains(d.bit))
            .copied()
            .collect();
        Catalog { defs }
    }

    /// Catalog containing every attribute this program knows about.
    pub fn full() -> Self {
        Catalog {
            defs: KNOWN_ATTRS.to_vec(),
        }
    }

    /// The union of all bits in this catalog.
    pub fn known_bits(&self) -> AttrFlags {
        self.defs
            .iter()
            .fold(AttrFlags::empty(), |acc, d| acc | d.bit)
    }

    pub fn len(&self) -> usize {
        self.defs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.defs.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &AttrDef> {
        self.defs.iter()
    }

    /// Mutable attributes only, in catalog order.
    pub fn iter_mutable(&self) -> impl Iterator<Item = &AttrDef> {
        self.defs.iter().filter(|d| d.mutable)
    }

    pub fn get(&self, index: usize) -> Option<&AttrDef> {
        self.defs.get(index)
    }

    /// Look up a definition by its letter code.
    pub fn by_code(&self, code: char) -> Option<&AttrDef> {
        self.defs.iter().find(|d| d.code == code)
    }

    /// Render a raw flag word against this catalog: the attribute code for
    /// each set bit, [`PREVIEW_UNSET`] otherwise, in catalog order.
    pub fn render(&self, flags: AttrFlags) -> String {
        self.defs
            .iter()
            .map(|d| {
                if flags.contains(d.bit) {
                    d.code
                } else {
                    PREVIEW_UNSET
                }
            })
            .collect()
    }
}

#[cfg(test)]
#[path = "catalog_tests.rs"]
mod tests;
