//! Sample hierarchy planted by `nodetree init`.

use crate::domain::FileSpec;

/// Blueprint of a node to create, with its subtree.
#[derive(Debug, Clone, PartialEq)]
pub enum Sample {
    Directory {
        name: &'static str,
        children: Vec<Sample>,
    },
    File {
        name: &'static str,
        size: f64,
        spec: FileSpec,
    },
}

impl Sample {
    /// Number of nodes in this blueprint, itself included.
    pub fn count(&self) -> usize {
        match self {
            Sample::Directory { children, .. } => {
                1 + children.iter().map(Sample::count).sum::<usize>()
            }
            Sample::File { .. } => 1,
        }
    }
}

fn dir(name: &'static str, children: Vec<Sample>) -> Sample {
    Sample::Directory { name, children }
}

fn file(name: &'static str, size: f64, spec: FileSpec) -> Sample {
    Sample::File { name, size, spec }
}

/// Root with project documents, personal notes (with a nested archive) and
/// a README. Total size 2749.5 KB.
pub fn sample_hierarchy() -> Sample {
    dir(
        "Root",
        vec![
            dir(
                "Project_Docs",
                vec![
                    file("Requirements.docx", 500.0, FileSpec::Word { pages: 15 }),
                    file(
                        "Architecture.png",
                        2048.0,
                        FileSpec::Image {
                            width: 1920,
                            height: 1080,
                        },
                    ),
                ],
            ),
            dir(
                "Personal_Notes",
                vec![
                    file(
                        "Todo.txt",
                        1.0,
                        FileSpec::Text {
                            encoding: "UTF-8".into(),
                        },
                    ),
                    dir(
                        "Archive_2025",
                        vec![file(
                            "Old_Meeting_Notes.docx",
                            200.0,
                            FileSpec::Word { pages: 5 },
                        )],
                    ),
                ],
            ),
            file(
                "README.txt",
                0.5,
                FileSpec::Text {
                    encoding: "ASCII".into(),
                },
            ),
        ],
    )
}
