//! The fixed package catalog and install configuration.

use std::path::PathBuf;

/// Framework release line used for companion-repository branches.
pub const FRAMEWORK_VERSION: &str = "3.2";

/// Explicit configuration for an install run.
///
/// Everything the installer needs to know about its surroundings lives
/// here; there is no ambient state.
#[derive(Debug, Clone)]
pub struct InstallConfig {
    /// Directory containing the framework checkouts.
    pub top_dir: PathBuf,
    /// Directory receiving third-party library builds.
    pub external_dir: PathBuf,
    /// Framework release line, e.g. `"3.2"`.
    pub version: String,
}

impl InstallConfig {
    /// Creates a config rooted at `top_dir`, with libraries under
    /// `<top_dir>/external` and the default release line.
    #[must_use]
    pub fn new(top_dir: PathBuf) -> Self {
        let external_dir = top_dir.join("external");
        Self { top_dir, external_dir, version: FRAMEWORK_VERSION.to_string() }
    }
}

/// How a repository package picks its branch.
#[derive(Debug, Clone, Copy)]
pub enum BranchSpec {
    /// `releases/<framework version>`, tracking the framework release line.
    FrameworkRelease,
    /// A fixed branch, for repositories versioned independently.
    Fixed(&'static str),
}

impl BranchSpec {
    /// Resolves the branch name for the given configuration.
    #[must_use]
    pub fn resolve(&self, config: &InstallConfig) -> String {
        match self {
            Self::FrameworkRelease => format!("releases/{}", config.version),
            Self::Fixed(branch) => (*branch).to_string(),
        }
    }
}

/// What kind of artifact a package is and how to obtain it.
#[derive(Debug)]
pub enum PackageKind {
    /// A companion repository cloned next to the framework checkouts.
    Repository {
        /// Clone URL.
        url: &'static str,
        /// Checkout directory name under the top directory.
        dir: &'static str,
        /// Branch selection.
        branch: BranchSpec,
    },
    /// A third-party library fetched as a tarball and built in place.
    Library {
        /// Archive URL.
        url: &'static str,
        /// Archive filename on disk.
        archive: &'static str,
        /// Directory name the archive unpacks to.
        unpacked_dir: &'static str,
        /// Canonical directory name under `external/`.
        dir: &'static str,
        /// Build commands run inside the library directory, in order.
        build: &'static [&'static str],
        /// Substring removed from the `configure` script before building.
        strip_from_configure: Option<&'static str>,
        /// Messages printed after a successful install.
        hints: &'static [&'static str],
    },
}

/// One installable package.
#[derive(Debug)]
pub struct Package {
    /// Name accepted on the command line.
    pub name: &'static str,
    /// Short description shown in help output.
    pub summary: &'static str,
    /// How to obtain and install it.
    pub kind: PackageKind,
}

/// The full catalog, in install order.
pub static PACKAGES: &[Package] = &[
    Package {
        name: "tutorials",
        summary: "Download the silt-tutorials repository.",
        kind: PackageKind::Repository {
            url: "https://git.silt-project.org/silt/silt-tutorials.git",
            dir: "silt-tutorials",
            branch: BranchSpec::FrameworkRelease,
        },
    },
    Package {
        name: "lectures",
        summary: "Download the silt-lectures repository.",
        kind: PackageKind::Repository {
            url: "https://git.silt-project.org/silt/silt-lectures.git",
            dir: "silt-lectures",
            branch: BranchSpec::FrameworkRelease,
        },
    },
    Package {
        name: "adaptive",
        summary: "Download the mesh-adaptive grid extension.",
        kind: PackageKind::Repository {
            url: "https://gitlab.mesh-project.org/extensions/mesh-adaptive.git",
            dir: "mesh-adaptive",
            branch: BranchSpec::Fixed("releases/2.4"),
        },
    },
    Package {
        name: "foam",
        summary: "Download the mesh-foam grid extension.",
        kind: PackageKind::Repository {
            url: "https://gitlab.mesh-project.org/extensions/mesh-foam.git",
            dir: "mesh-foam",
            branch: BranchSpec::Fixed("releases/2.4"),
        },
    },
    Package {
        name: "multidomain",
        summary: "Download the mesh-multidomain extension.",
        kind: PackageKind::Repository {
            url: "https://gitlab.mesh-project.org/extensions/mesh-multidomain.git",
            dir: "mesh-multidomain",
            branch: BranchSpec::Fixed("releases/2.0"),
        },
    },
    Package {
        name: "glpk",
        summary: "Download and install the GLPK linear-programming kit.",
        kind: PackageKind::Library {
            url: "http://ftp.gnu.org/gnu/glpk/glpk-4.60.tar.gz",
            archive: "glpk-4.60.tar.gz",
            unpacked_dir: "glpk-4.60",
            dir: "glpk",
            build: &["./configure", "make"],
            strip_from_configure: None,
            hints: &[
                "It might be necessary to set the glpk path manually in the",
                "CMAKE_FLAGS section of the .opts file:",
                "  -DGLPK_ROOT=/path/to/glpk \\",
            ],
        },
    },
    Package {
        name: "nlopt",
        summary: "Download and install the NLopt optimization library.",
        kind: PackageKind::Library {
            url: "http://ab-initio.mit.edu/nlopt/nlopt-2.4.2.tar.gz",
            archive: "nlopt-2.4.2.tar.gz",
            unpacked_dir: "nlopt-2.4.2",
            dir: "nlopt",
            build: &["./configure", "make"],
            strip_from_configure: None,
            hints: &[],
        },
    },
    Package {
        name: "metis",
        summary: "Install the METIS graph partitioner.",
        kind: PackageKind::Library {
            url: "http://glaros.dtc.umn.edu/gkhome/fetch/sw/metis/metis-5.1.0.tar.gz",
            archive: "metis-5.1.0.tar.gz",
            unpacked_dir: "metis-5.1.0",
            dir: "metis-5.1.0",
            build: &["make config", "make"],
            strip_from_configure: None,
            hints: &[],
        },
    },
    Package {
        name: "gstat",
        summary: "Download and install the gstat geostatistics tool.",
        kind: PackageKind::Library {
            url: "http://gstat.org/gstat.tar.gz",
            archive: "gstat.tar.gz",
            unpacked_dir: "standalone",
            dir: "gstat",
            build: &["./configure", "make"],
            // The shipped configure references a doc makefile that is
            // not in the tarball.
            strip_from_configure: Some("doc/tex/makefile"),
            hints: &[],
        },
    },
];

/// Group pseudo-packages accepted on the command line.
static GROUPS: &[(&str, &[&str])] = &[
    ("framework", &["tutorials", "lectures"]),
    ("grid", &["adaptive", "foam", "multidomain"]),
    ("optimization", &["glpk", "nlopt"]),
    ("others", &["metis", "gstat"]),
];

/// Looks up a package by name.
#[must_use]
pub fn find(name: &str) -> Option<&'static Package> {
    PACKAGES.iter().find(|p| p.name == name)
}

/// Expands package and group names into a deduplicated package list,
/// preserving the order given on the command line.
///
/// The pseudo-package `all` selects the entire catalog.
///
/// # Errors
///
/// Returns an error naming the first unknown package.
pub fn expand_selection(names: &[String]) -> Result<Vec<&'static Package>, String> {
    let mut selected: Vec<&'static Package> = Vec::new();
    let mut push = |package: &'static Package| {
        if !selected.iter().any(|p| p.name == package.name) {
            selected.push(package);
        }
    };

    for name in names {
        if name == "all" {
            PACKAGES.iter().for_each(&mut push);
        } else if let Some((_, members)) = GROUPS.iter().find(|(group, _)| *group == name.as_str()) {
            for member in *members {
                push(find(member).expect("group member must exist in catalog"));
            }
        } else if let Some(package) = find(name) {
            push(package);
        } else {
            return Err(format!(
                "Unknown package {name}. Run silt install --help for the list of packages."
            ));
        }
    }
    Ok(selected)
}
