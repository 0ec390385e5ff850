use std::io::{self, Write};

use crate::connectivity::{Connectivity, FACES_PER_TREE};

/// Prints `connectivity` in the format [`crate::read_connectivity`]
/// accepts: placeholder zero counters for the tag/curved sections,
/// which this crate never populates.
pub fn write_connectivity<W: Write>(connectivity: &Connectivity, out: &mut W) -> io::Result<()> {
    writeln!(out, "[Forest Info]")?;
    writeln!(out, "ver = 0.0.1  # Version of the forest file")?;
    writeln!(out, "Nk  = {}      # Number of elements", connectivity.num_trees)?;
    writeln!(out, "Nv  = {}      # Number of mesh vertices", connectivity.num_vertices)?;
    writeln!(out, "Net = 0      # Number of element tags")?;
    writeln!(out, "Nft = 0      # Number of face tags")?;
    writeln!(out, "Ncf = 0      # Number of curved faces")?;
    writeln!(out, "Nct = 0      # Number of curved types")?;
    writeln!(out)?;

    writeln!(out, "[Coordinates of Element Vertices]")?;

    writeln!(out, "[Element to Vertex]")?;
    for tree in 0..connectivity.num_trees as usize {
        let base = tree * FACES_PER_TREE;
        writeln!(
            out,
            "    {}    {}    {}    {}    {}",
            tree + 1,
            connectivity.tree_to_vertex[base] + 1,
            connectivity.tree_to_vertex[base + 1] + 1,
            connectivity.tree_to_vertex[base + 2] + 1,
            connectivity.tree_to_vertex[base + 3] + 1,
        )?;
    }

    writeln!(out, "[Element to Element]")?;
    for tree in 0..connectivity.num_trees as usize {
        let base = tree * FACES_PER_TREE;
        writeln!(
            out,
            "    {}    {}    {}    {}    {}",
            tree + 1,
            connectivity.tree_to_tree[base] + 1,
            connectivity.tree_to_tree[base + 1] + 1,
            connectivity.tree_to_tree[base + 2] + 1,
            connectivity.tree_to_tree[base + 3] + 1,
        )?;
    }

    writeln!(out, "[Element to Face]")?;
    for tree in 0..connectivity.num_trees as usize {
        let base = tree * FACES_PER_TREE;
        writeln!(
            out,
            "    {}    {}    {}    {}    {}",
            tree + 1,
            connectivity.tree_to_face[base] + 1,
            connectivity.tree_to_face[base + 1] + 1,
            connectivity.tree_to_face[base + 2] + 1,
            connectivity.tree_to_face[base + 3] + 1,
        )?;
    }

    writeln!(out, "[Element Tags]")?;
    writeln!(out, "[Face Tags]")?;
    writeln!(out, "[Curved Faces]")?;
    writeln!(out, "[Curved Types]")?;

    Ok(())
}
