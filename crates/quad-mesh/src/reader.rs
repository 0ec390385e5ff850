use std::io::BufRead;

use crate::connectivity::{Connectivity, FACES_PER_TREE};
use crate::error::MeshError;

/// Recognized section headers.
/// `Coord`/`ElementTags`/`FaceTags`/`CurvedFaces`/`CurvedTypes` are
/// reserved: recognized so the parser doesn't reject them, but their
/// body lines are never interpreted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Section {
    None,
    Info,
    Coord,
    ElementToVertex,
    ElementToElement,
    ElementToFace,
    ElementTags,
    FaceTags,
    CurvedFaces,
    CurvedTypes,
}

/// Parses the ASCII connectivity format from `reader`.
///
/// Comments (`#` to end of line) and blank lines are ignored; `[Forest
/// Info]` must come first and set `Nk=`/`Nv=` before any other section
/// is allowed to contribute data. `Element to *` sections hold one
/// 1-based five-integer record per tree.
pub fn read_connectivity<R: BufRead>(reader: R) -> Result<Connectivity, MeshError> {
    read_connectivity_inner(reader).map_err(|err| {
        log::error!("failed to read mesh connectivity: {err}");
        err
    })
}

fn read_connectivity_inner<R: BufRead>(reader: R) -> Result<Connectivity, MeshError> {
    let mut section = Section::None;
    let mut section_lines_read: i32 = 0;
    let mut connectivity: Option<Connectivity> = None;
    let mut pending_num_trees: Option<i32> = None;
    let mut pending_num_vertices: Option<i32> = None;

    for line in reader.lines() {
        let line = line?;
        let line = strip_comment(&line);
        let line = line.trim();

        if line.is_empty() {
            continue;
        }

        if let Some(header) = line.strip_prefix('[') {
            check_section_complete(section, section_lines_read, connectivity.as_ref())?;

            let name = header
                .strip_suffix(']')
                .ok_or(MeshError::UnterminatedSection)?;
            section = parse_section_name(name)?;

            if section != Section::Info && connectivity.is_none() {
                return Err(MeshError::InfoSectionMustComeFirst);
            }
            section_lines_read = 0;
            continue;
        }

        match section {
            Section::None => return Err(MeshError::MissingFirstSection),
            Section::Info => {
                let (key, value) = line.split_once('=').ok_or(MeshError::MalformedKeyValue)?;
                match key.trim() {
                    "Nk" if connectivity.is_none() => {
                        pending_num_trees = Some(value.trim().parse()?);
                    }
                    "Nv" if connectivity.is_none() => {
                        pending_num_vertices = Some(value.trim().parse()?);
                    }
                    _ => {}
                }
                if connectivity.is_none() {
                    if let (Some(num_trees), Some(num_vertices)) =
                        (pending_num_trees, pending_num_vertices)
                    {
                        connectivity = Some(Connectivity::new(num_trees, num_vertices));
                    }
                }
            }
            Section::Coord
            | Section::ElementTags
            | Section::FaceTags
            | Section::CurvedFaces
            | Section::CurvedTypes => {
                // Reserved: recognized, contents discarded.
            }
            Section::ElementToVertex => {
                let connectivity = connectivity
                    .as_mut()
                    .ok_or(MeshError::InfoSectionMustComeFirst)?;
                let fields = parse_five_ints(line)?;
                let tree = check_tree_index(fields[0], connectivity.num_trees)?;
                for corner in 0..FACES_PER_TREE {
                    let vertex = fields[corner + 1] - 1;
                    if !(0..connectivity.num_vertices).contains(&vertex) {
                        return Err(MeshError::VertexOutOfRange(fields[corner + 1]));
                    }
                    connectivity.tree_to_vertex[tree * FACES_PER_TREE + corner] = vertex;
                }
            }
            Section::ElementToElement => {
                let connectivity = connectivity
                    .as_mut()
                    .ok_or(MeshError::InfoSectionMustComeFirst)?;
                let fields = parse_five_ints(line)?;
                let tree = check_tree_index(fields[0], connectivity.num_trees)?;
                for face in 0..FACES_PER_TREE {
                    let neighbor = check_tree_index(fields[face + 1], connectivity.num_trees)?;
                    connectivity.tree_to_tree[tree * FACES_PER_TREE + face] = neighbor as i32;
                }
            }
            Section::ElementToFace => {
                let connectivity = connectivity
                    .as_mut()
                    .ok_or(MeshError::InfoSectionMustComeFirst)?;
                let fields = parse_five_ints(line)?;
                let tree = check_tree_index(fields[0], connectivity.num_trees)?;
                for face in 0..FACES_PER_TREE {
                    let neighbor_face = fields[face + 1] - 1;
                    if !(0..4).contains(&neighbor_face) {
                        return Err(MeshError::FaceOutOfRange(fields[face + 1]));
                    }
                    connectivity.tree_to_face[tree * FACES_PER_TREE + face] = neighbor_face as u8;
                }
            }
        }

        section_lines_read += 1;
    }

    check_section_complete(section, section_lines_read, connectivity.as_ref())?;

    connectivity.ok_or(MeshError::InfoSectionMustComeFirst)
}

fn strip_comment(line: &str) -> &str {
    match line.find('#') {
        Some(index) => &line[..index],
        None => line,
    }
}

fn parse_section_name(name: &str) -> Result<Section, MeshError> {
    Ok(match name {
        "Forest Info" => Section::Info,
        "Coordinates of Element Vertices" => Section::Coord,
        "Element to Vertex" => Section::ElementToVertex,
        "Element to Element" => Section::ElementToElement,
        "Element to Face" => Section::ElementToFace,
        "Element Tags" => Section::ElementTags,
        "Face Tags" => Section::FaceTags,
        "Curved Faces" => Section::CurvedFaces,
        "Curved Types" => Section::CurvedTypes,
        other => return Err(MeshError::UnknownSection(other.to_string())),
    })
}

/// On leaving `section` (either via a new header or end of file),
/// checks that a tracked section read exactly `Nk` records.
fn check_section_complete(
    section: Section,
    lines_read: i32,
    connectivity: Option<&Connectivity>,
) -> Result<(), MeshError> {
    let Some(connectivity) = connectivity else {
        return Ok(());
    };
    let name = match section {
        Section::ElementToVertex => "Element to Vertex",
        Section::ElementToElement => "Element to Element",
        Section::ElementToFace => "Element to Face",
        _ => return Ok(()),
    };
    if lines_read != connectivity.num_trees {
        return Err(MeshError::IncompleteSection(name));
    }
    Ok(())
}

/// Parses a 1-based tree index field and converts it to a validated
/// 0-based `usize`.
fn check_tree_index(field: i32, num_trees: i32) -> Result<usize, MeshError> {
    let index = field - 1;
    if !(0..num_trees).contains(&index) {
        return Err(MeshError::TreeIndexOutOfRange(field));
    }
    Ok(index as usize)
}

/// Splits `line` into five whitespace-separated integers (a tree index
/// plus four corner/neighbor/face values), still 1-based.
fn parse_five_ints(line: &str) -> Result<[i32; 5], MeshError> {
    let mut fields = [0i32; 5];
    let mut tokens = line.split_whitespace();
    for field in fields.iter_mut() {
        let token = tokens.next().ok_or(MeshError::MalformedRecord)?;
        *field = token.parse()?;
    }
    Ok(fields)
}
