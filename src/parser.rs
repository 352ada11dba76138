//! URDF XML parser.
//!
//! Event-driven parse of URDF XML into the in-memory robot model. The parser
//! assembles links, joints, materials, loop joints, fixed frames, and sensors
//! in a single pass over the document, then runs the post passes that need
//! the whole model: mimic resolution, the joint linkage pass, and root
//! resolution. Structural problems surface as [`UrdfError`]; auxiliary
//! elements (loop joints, fixed frames, sensors) recover per element with a
//! warning instead.

use std::collections::BTreeMap;
use std::io::BufRead;
use std::path::Path;

use nalgebra::{Quaternion, UnitQuaternion, Vector3};
use quick_xml::Reader;
use quick_xml::events::{BytesStart, Event};
use tracing::{debug, warn};

use crate::chain;
use crate::error::{Result, UrdfError};
use crate::sanitize::sanitize_identifier;
use crate::types::{
    Camera, Collision, Color, Geometry, Inertia, Inertial, Joint, JointDynamics, JointLimit,
    JointMimic, JointType, Lidar, LidarDimensions, Link, LoopJoint, Material, Transform, UrdfRobot,
    Visual,
};

/// Parse a URDF file into a robot model.
///
/// # Errors
///
/// Returns an error if the file cannot be read, the XML is malformed, or the
/// document violates a structural rule (see [`parse_urdf_str`]).
pub fn parse_urdf_file(path: impl AsRef<Path>) -> Result<UrdfRobot> {
    let xml = std::fs::read_to_string(path)?;
    parse_urdf_str(&xml)
}

/// Parse a URDF string into a robot model.
///
/// # Errors
///
/// Returns an error if the XML is malformed, a link/joint/material breaks a
/// structural rule (unnamed, untyped, duplicate, missing geometry or
/// mandatory numeric attribute, dangling link reference), or no root link
/// can be resolved.
pub fn parse_urdf_str(xml: &str) -> Result<UrdfRobot> {
    let mut reader = Reader::from_str(xml);
    reader.config_mut().trim_text(true);
    parse_urdf_reader(&mut reader)
}

/// Parse URDF from a reader.
fn parse_urdf_reader<R: BufRead>(reader: &mut Reader<R>) -> Result<UrdfRobot> {
    let mut buf = Vec::new();
    let mut robot: Option<UrdfRobot> = None;

    loop {
        match reader.read_event_into(&mut buf) {
            Ok(Event::Start(ref e)) if e.name().as_ref() == b"robot" => {
                robot = Some(parse_robot(reader, e)?);
            }
            // A self-closing robot element has no links.
            Ok(Event::Empty(ref e)) if e.name().as_ref() == b"robot" => {
                return Err(UrdfError::NoRootLink);
            }
            Ok(Event::Eof) => break,
            Ok(_) => {}
            Err(e) => return Err(UrdfError::XmlParse(e.to_string())),
        }
        buf.clear();
    }

    robot.ok_or(UrdfError::EmptyDocument)
}

/// A sensor parsed from the document, waiting to be attached to its link.
enum SensorKind {
    Camera(Camera),
    Lidar(Lidar),
}

/// Parse the robot element and everything under it.
fn parse_robot<R: BufRead>(reader: &mut Reader<R>, start: &BytesStart) -> Result<UrdfRobot> {
    let name = get_attribute_opt(start, "name")
        .map(|s| sanitize_identifier(&s))
        .unwrap_or_default();
    let mut robot = UrdfRobot::new(name);

    // Fixed frames and sensors reference links by name, and the referenced
    // link element may appear later in the document, so they are collected
    // during the walk and attached afterwards.
    let mut pending_frames: Vec<(String, String, Transform)> = Vec::new();
    let mut pending_sensors: Vec<(String, SensorKind)> = Vec::new();

    let mut buf = Vec::new();

    loop {
        match reader.read_event_into(&mut buf) {
            Ok(Event::Start(ref e)) => {
                let elem_name = e.name().as_ref().to_vec();
                match elem_name.as_slice() {
                    b"link" => {
                        let link = parse_link(reader, e)?;
                        if robot.links.contains_key(&link.name) {
                            return Err(UrdfError::DuplicateLink(link.name));
                        }
                        robot.links.insert(link.name.clone(), link);
                    }
                    b"joint" => {
                        let joint = parse_joint(reader, e)?;
                        if robot.joints.contains_key(&joint.name) {
                            return Err(UrdfError::DuplicateJoint(joint.name));
                        }
                        robot.joints.insert(joint.name.clone(), joint);
                    }
                    b"material" => {
                        let (name, material) = parse_material_definition(reader, e)?;
                        if robot.materials.contains_key(&name) {
                            return Err(UrdfError::DuplicateMaterial(name));
                        }
                        robot.materials.insert(name, material);
                    }
                    b"loop_joint" => {
                        if let Some(loop_joint) = parse_loop_joint(reader, e)? {
                            if robot.loop_joints.contains_key(&loop_joint.name) {
                                warn!(
                                    loop_joint = %loop_joint.name,
                                    "duplicate loop joint name, keeping the first"
                                );
                            } else {
                                robot
                                    .loop_joints
                                    .insert(loop_joint.name.clone(), loop_joint);
                            }
                        }
                    }
                    b"fixed_frame" => {
                        if let Some(frame) = parse_fixed_frame(reader, e)? {
                            pending_frames.push(frame);
                        }
                    }
                    b"sensor" => {
                        if let Some(sensor) = parse_sensor(reader, e)? {
                            pending_sensors.push(sensor);
                        }
                    }
                    b"mujoco_camera" => {
                        if let Some((parent, camera)) = parse_mujoco_camera(reader, e)? {
                            pending_sensors.push((parent, SensorKind::Camera(camera)));
                        }
                    }
                    _ => skip_element(reader, &elem_name)?,
                }
            }
            Ok(Event::Empty(ref e)) => match e.name().as_ref() {
                // A self-closing link carries just a name.
                b"link" => {
                    let name = sanitize_identifier(&get_attribute(e, "name")?);
                    if robot.links.contains_key(&name) {
                        return Err(UrdfError::DuplicateLink(name));
                    }
                    robot.links.insert(name.clone(), Link::new(name));
                }
                // A self-closing joint cannot carry its parent/child elements.
                b"joint" => {
                    let name = sanitize_identifier(&get_attribute(e, "name")?);
                    let type_str = get_attribute(e, "type")?;
                    if JointType::from_str(&type_str).is_none() {
                        return Err(UrdfError::UnknownJointType(type_str));
                    }
                    return Err(UrdfError::missing_element("parent", format!("joint '{name}'")));
                }
                b"material" => {
                    let name = material_definition_name(e)?;
                    if robot.materials.contains_key(&name) {
                        return Err(UrdfError::DuplicateMaterial(name));
                    }
                    robot
                        .materials
                        .insert(name.clone(), Material::named(name));
                }
                b"loop_joint" => {
                    warn!("loop joint is missing its link attachments, skipping");
                }
                b"fixed_frame" => {
                    warn!("fixed frame has no parent element, skipping");
                }
                b"sensor" | b"mujoco_camera" => {
                    warn!("sensor has no parent element, skipping");
                }
                _ => {}
            },
            Ok(Event::End(ref e)) if e.name().as_ref() == b"robot" => break,
            Ok(Event::Eof) => return Err(UrdfError::XmlParse("unexpected EOF in robot".into())),
            Ok(_) => {}
            Err(e) => return Err(UrdfError::XmlParse(e.to_string())),
        }
        buf.clear();
    }

    resolve_mimics(&mut robot);
    attach_fixed_frames(&mut robot, pending_frames);
    populate_joint_tree(&mut robot)?;
    attach_sensors(&mut robot, pending_sensors);
    robot.root_link_name = chain::find_root_link(&robot)?;

    Ok(robot)
}

// ============================================================================
// Links
// ============================================================================

/// Parse a link element.
fn parse_link<R: BufRead>(reader: &mut Reader<R>, start: &BytesStart) -> Result<Link> {
    let name = sanitize_identifier(&get_attribute(start, "name")?);
    let mut link = Link::new(name);
    let mut buf = Vec::new();

    loop {
        match reader.read_event_into(&mut buf) {
            Ok(Event::Start(ref e)) => {
                let elem_name = e.name().as_ref().to_vec();
                match elem_name.as_slice() {
                    b"inertial" => {
                        link.inertial = parse_inertial(reader)?;
                    }
                    b"visual" => {
                        link.visuals.push(parse_visual(reader, e)?);
                    }
                    b"collision" => {
                        link.collisions.push(parse_collision(reader, e)?);
                    }
                    _ => skip_element(reader, &elem_name)?,
                }
            }
            Ok(Event::Empty(ref e)) => match e.name().as_ref() {
                // An empty inertial supplies none of its three fields.
                b"inertial" => {}
                b"visual" => {
                    let name = get_attribute_opt(e, "name");
                    return Err(UrdfError::missing_geometry(element_context(
                        "visual",
                        name.as_deref(),
                    )));
                }
                b"collision" => {
                    let name = get_attribute_opt(e, "name");
                    return Err(UrdfError::missing_geometry(element_context(
                        "collision",
                        name.as_deref(),
                    )));
                }
                _ => {}
            },
            Ok(Event::End(ref e)) if e.name().as_ref() == b"link" => break,
            Ok(Event::Eof) => return Err(UrdfError::XmlParse("unexpected EOF in link".into())),
            Ok(_) => {}
            Err(e) => return Err(UrdfError::XmlParse(e.to_string())),
        }
        buf.clear();
    }

    Ok(link)
}

/// Parse an inertial element. Each of origin, mass, and inertia is tracked
/// independently; whichever the document omits stays `None`.
fn parse_inertial<R: BufRead>(reader: &mut Reader<R>) -> Result<Inertial> {
    let mut inertial = Inertial::default();
    let mut buf = Vec::new();

    loop {
        match reader.read_event_into(&mut buf) {
            Ok(Event::Start(ref e)) | Ok(Event::Empty(ref e)) => match e.name().as_ref() {
                b"origin" => {
                    inertial.origin = Some(parse_origin_attrs(e));
                }
                b"mass" => {
                    inertial.mass = Some(parse_mass(e)?);
                }
                b"inertia" => {
                    inertial.inertia = Some(parse_inertia_attrs(e)?);
                }
                _ => {}
            },
            Ok(Event::End(ref e)) if e.name().as_ref() == b"inertial" => break,
            Ok(Event::Eof) => return Err(UrdfError::XmlParse("unexpected EOF in inertial".into())),
            Ok(_) => {}
            Err(e) => return Err(UrdfError::XmlParse(e.to_string())),
        }
        buf.clear();
    }

    Ok(inertial)
}

/// Parse a mass element. The `value` attribute is mandatory once the element
/// exists.
fn parse_mass(e: &BytesStart) -> Result<f64> {
    let value = get_attribute(e, "value")?;
    value
        .parse()
        .map_err(|_| UrdfError::invalid_attribute("value", "mass", "expected a number"))
}

/// Parse an inertia element. All six tensor components are mandatory once
/// the element exists.
fn parse_inertia_attrs(e: &BytesStart) -> Result<Inertia> {
    Ok(Inertia {
        ixx: require_float_attr(e, "ixx")?,
        ixy: require_float_attr(e, "ixy")?,
        ixz: require_float_attr(e, "ixz")?,
        iyy: require_float_attr(e, "iyy")?,
        iyz: require_float_attr(e, "iyz")?,
        izz: require_float_attr(e, "izz")?,
    })
}

// ============================================================================
// Geometry, visuals, collisions
// ============================================================================

/// Parse a geometry element into its shape.
fn parse_geometry<R: BufRead>(reader: &mut Reader<R>) -> Result<Geometry> {
    let mut buf = Vec::new();
    let mut geometry: Option<Geometry> = None;

    loop {
        match reader.read_event_into(&mut buf) {
            Ok(Event::Start(ref e)) | Ok(Event::Empty(ref e)) => match e.name().as_ref() {
                b"box" => {
                    let size = get_attribute(e, "size")?;
                    let size = parse_vector3(&size).map_err(|_| {
                        UrdfError::invalid_attribute("size", "box", "expected three numbers")
                    })?;
                    geometry = Some(Geometry::Box { size });
                }
                b"cylinder" => {
                    geometry = Some(Geometry::Cylinder {
                        radius: require_float_attr(e, "radius")?,
                        length: require_float_attr(e, "length")?,
                    });
                }
                b"capsule" => {
                    geometry = Some(Geometry::Capsule {
                        radius: require_float_attr(e, "radius")?,
                        length: require_float_attr(e, "length")?,
                    });
                }
                b"sphere" => {
                    geometry = Some(Geometry::Sphere {
                        radius: require_float_attr(e, "radius")?,
                    });
                }
                b"mesh" => {
                    let filename = get_attribute(e, "filename")?;
                    let scale = get_attribute_opt(e, "scale")
                        .map(|s| {
                            parse_vector3(&s).map_err(|_| {
                                UrdfError::invalid_attribute(
                                    "scale",
                                    "mesh",
                                    "expected three numbers",
                                )
                            })
                        })
                        .transpose()?;
                    geometry = Some(Geometry::Mesh { filename, scale });
                }
                other => {
                    return Err(UrdfError::XmlParse(format!(
                        "unsupported geometry shape '{}'",
                        String::from_utf8_lossy(other)
                    )));
                }
            },
            Ok(Event::End(ref e)) if e.name().as_ref() == b"geometry" => break,
            Ok(Event::Eof) => return Err(UrdfError::XmlParse("unexpected EOF in geometry".into())),
            Ok(_) => {}
            Err(e) => return Err(UrdfError::XmlParse(e.to_string())),
        }
        buf.clear();
    }

    geometry.ok_or_else(|| UrdfError::missing_element("shape", "geometry"))
}

/// Parse a visual element.
fn parse_visual<R: BufRead>(reader: &mut Reader<R>, start: &BytesStart) -> Result<Visual> {
    let name = get_attribute_opt(start, "name").map(|s| sanitize_identifier(&s));
    let mut origin = Transform::identity();
    let mut geometry: Option<Geometry> = None;
    let mut material: Option<Material> = None;
    let mut buf = Vec::new();

    loop {
        match reader.read_event_into(&mut buf) {
            Ok(Event::Start(ref e)) => {
                let elem_name = e.name().as_ref().to_vec();
                match elem_name.as_slice() {
                    b"origin" => origin = parse_origin_attrs(e),
                    b"geometry" => geometry = Some(parse_geometry(reader)?),
                    b"material" => material = Some(parse_inline_material(reader, e)?),
                    _ => skip_element(reader, &elem_name)?,
                }
            }
            Ok(Event::Empty(ref e)) => match e.name().as_ref() {
                b"origin" => origin = parse_origin_attrs(e),
                b"material" => material = Some(inline_material_from_attrs(e)),
                _ => {}
            },
            Ok(Event::End(ref e)) if e.name().as_ref() == b"visual" => break,
            Ok(Event::Eof) => return Err(UrdfError::XmlParse("unexpected EOF in visual".into())),
            Ok(_) => {}
            Err(e) => return Err(UrdfError::XmlParse(e.to_string())),
        }
        buf.clear();
    }

    let geometry = geometry
        .ok_or_else(|| UrdfError::missing_geometry(element_context("visual", name.as_deref())))?;

    Ok(Visual {
        name,
        origin,
        geometry,
        material,
    })
}

/// Parse a collision element.
fn parse_collision<R: BufRead>(reader: &mut Reader<R>, start: &BytesStart) -> Result<Collision> {
    let name = get_attribute_opt(start, "name").map(|s| sanitize_identifier(&s));
    let mut origin = Transform::identity();
    let mut geometry: Option<Geometry> = None;
    let mut buf = Vec::new();

    loop {
        match reader.read_event_into(&mut buf) {
            Ok(Event::Start(ref e)) => {
                let elem_name = e.name().as_ref().to_vec();
                match elem_name.as_slice() {
                    b"origin" => origin = parse_origin_attrs(e),
                    b"geometry" => geometry = Some(parse_geometry(reader)?),
                    _ => skip_element(reader, &elem_name)?,
                }
            }
            Ok(Event::Empty(ref e)) => {
                if e.name().as_ref() == b"origin" {
                    origin = parse_origin_attrs(e);
                }
            }
            Ok(Event::End(ref e)) if e.name().as_ref() == b"collision" => break,
            Ok(Event::Eof) => {
                return Err(UrdfError::XmlParse("unexpected EOF in collision".into()));
            }
            Ok(_) => {}
            Err(e) => return Err(UrdfError::XmlParse(e.to_string())),
        }
        buf.clear();
    }

    let geometry = geometry.ok_or_else(|| {
        UrdfError::missing_geometry(element_context("collision", name.as_deref()))
    })?;

    Ok(Collision {
        name,
        origin,
        geometry,
    })
}

// ============================================================================
// Materials
// ============================================================================

/// Parse a top-level material definition. The name is mandatory; `color`
/// needs a parsable `rgba` and `texture` a `filename` once present.
fn parse_material_definition<R: BufRead>(
    reader: &mut Reader<R>,
    start: &BytesStart,
) -> Result<(String, Material)> {
    let name = material_definition_name(start)?;
    let mut color: Option<Color> = None;
    let mut texture: Option<String> = None;
    let mut buf = Vec::new();

    loop {
        match reader.read_event_into(&mut buf) {
            Ok(Event::Start(ref e)) | Ok(Event::Empty(ref e)) => match e.name().as_ref() {
                b"color" => {
                    let rgba = get_attribute(e, "rgba")?;
                    color = Some(parse_color(&rgba)?);
                }
                b"texture" => {
                    texture = Some(get_attribute(e, "filename")?);
                }
                _ => {}
            },
            Ok(Event::End(ref e)) if e.name().as_ref() == b"material" => break,
            Ok(Event::Eof) => return Err(UrdfError::XmlParse("unexpected EOF in material".into())),
            Ok(_) => {}
            Err(e) => return Err(UrdfError::XmlParse(e.to_string())),
        }
        buf.clear();
    }

    let material = Material {
        name: Some(name.clone()),
        color,
        texture_file: texture,
    };
    Ok((name, material))
}

/// Required, sanitized name of a top-level material definition.
fn material_definition_name(e: &BytesStart) -> Result<String> {
    match get_attribute_opt(e, "name") {
        Some(name) if !name.is_empty() => Ok(sanitize_identifier(&name)),
        _ => Err(UrdfError::missing_attribute("name", "material")),
    }
}

/// Parse an inline material inside a visual. A named inline material is a
/// reference to a top-level definition and its own color/texture children
/// are ignored; an unnamed one carries color and/or texture directly.
fn parse_inline_material<R: BufRead>(
    reader: &mut Reader<R>,
    start: &BytesStart,
) -> Result<Material> {
    let name = get_attribute_opt(start, "name")
        .filter(|n| !n.is_empty())
        .map(|n| sanitize_identifier(&n));
    let named = name.is_some();
    let mut color: Option<Color> = None;
    let mut texture: Option<String> = None;
    let mut buf = Vec::new();

    loop {
        match reader.read_event_into(&mut buf) {
            Ok(Event::Start(ref e)) | Ok(Event::Empty(ref e)) => match e.name().as_ref() {
                b"color" if !named => {
                    color = match get_attribute_opt(e, "rgba").map(|s| parse_color(&s)) {
                        Some(Ok(c)) => Some(c),
                        _ => {
                            debug!("inline material color is unreadable, ignoring");
                            None
                        }
                    };
                }
                b"texture" if !named => {
                    texture = Some(get_attribute(e, "filename")?);
                }
                _ => {}
            },
            Ok(Event::End(ref e)) if e.name().as_ref() == b"material" => break,
            Ok(Event::Eof) => return Err(UrdfError::XmlParse("unexpected EOF in material".into())),
            Ok(_) => {}
            Err(e) => return Err(UrdfError::XmlParse(e.to_string())),
        }
        buf.clear();
    }

    Ok(Material {
        name,
        color,
        texture_file: texture,
    })
}

/// Inline material from a self-closing element: a name reference at most.
fn inline_material_from_attrs(e: &BytesStart) -> Material {
    match get_attribute_opt(e, "name").filter(|n| !n.is_empty()) {
        Some(name) => Material::named(sanitize_identifier(&name)),
        None => Material::default(),
    }
}

// ============================================================================
// Joints
// ============================================================================

/// Parse a joint element.
fn parse_joint<R: BufRead>(reader: &mut Reader<R>, start: &BytesStart) -> Result<Joint> {
    let name = sanitize_identifier(&get_attribute(start, "name")?);
    let type_str = get_attribute(start, "type")?;
    let joint_type =
        JointType::from_str(&type_str).ok_or(UrdfError::UnknownJointType(type_str))?;
    let dont_collapse = match get_attribute_opt(start, "dont_collapse") {
        Some(value) => match value.as_str() {
            "true" | "1" => true,
            "false" | "0" => false,
            other => {
                warn!(joint = %name, value = other, "unrecognized dont_collapse value, treating as false");
                false
            }
        },
        None => false,
    };

    let mut parent: Option<String> = None;
    let mut child: Option<String> = None;
    let mut origin = Transform::identity();
    let mut axis = Vector3::x();
    let mut limit: Option<JointLimit> = None;
    let mut dynamics = JointDynamics::default();
    let mut mimic: Option<JointMimic> = None;

    let mut buf = Vec::new();

    loop {
        match reader.read_event_into(&mut buf) {
            Ok(Event::Start(ref e)) | Ok(Event::Empty(ref e)) => match e.name().as_ref() {
                b"parent" => {
                    parent = Some(sanitize_identifier(&get_attribute(e, "link")?));
                }
                b"child" => {
                    child = Some(sanitize_identifier(&get_attribute(e, "link")?));
                }
                b"origin" => {
                    origin = parse_origin_attrs(e);
                }
                b"axis" => {
                    if let Some(xyz) = get_attribute_opt(e, "xyz") {
                        axis = parse_vector3(&xyz).map_err(|_| {
                            UrdfError::invalid_attribute("xyz", "axis", "expected three numbers")
                        })?;
                    }
                }
                b"limit" => {
                    limit = Some(parse_joint_limit(e)?);
                }
                b"dynamics" => {
                    dynamics = parse_joint_dynamics(e);
                }
                b"mimic" => {
                    mimic = parse_joint_mimic(e, &name);
                }
                _ => {}
            },
            Ok(Event::End(ref e)) if e.name().as_ref() == b"joint" => break,
            Ok(Event::Eof) => return Err(UrdfError::XmlParse("unexpected EOF in joint".into())),
            Ok(_) => {}
            Err(e) => return Err(UrdfError::XmlParse(e.to_string())),
        }
        buf.clear();
    }

    let parent =
        parent.ok_or_else(|| UrdfError::missing_element("parent", format!("joint '{name}'")))?;
    let child =
        child.ok_or_else(|| UrdfError::missing_element("child", format!("joint '{name}'")))?;

    if limit.is_none() && matches!(joint_type, JointType::Revolute | JointType::Prismatic) {
        return Err(UrdfError::missing_element("limit", format!("joint '{name}'")));
    }

    let mut joint = Joint::new(name, joint_type, parent, child)
        .with_origin(origin)
        .with_axis(axis);
    joint.limit = limit.unwrap_or_default();
    joint.dynamics = dynamics;
    joint.mimic = mimic;
    joint.dont_collapse = dont_collapse;

    Ok(joint)
}

/// Parse a limit element. `lower`/`upper` fall back to zero when unreadable;
/// `effort`/`velocity` must parse once present.
fn parse_joint_limit(e: &BytesStart) -> Result<JointLimit> {
    let mut limit = JointLimit::default();
    if let Some(s) = get_attribute_opt(e, "lower") {
        limit.lower = s.parse().unwrap_or_else(|_| {
            debug!(value = %s, "unreadable lower limit, using 0");
            0.0
        });
    }
    if let Some(s) = get_attribute_opt(e, "upper") {
        limit.upper = s.parse().unwrap_or_else(|_| {
            debug!(value = %s, "unreadable upper limit, using 0");
            0.0
        });
    }
    if let Some(s) = get_attribute_opt(e, "effort") {
        limit.effort = s
            .parse()
            .map_err(|_| UrdfError::invalid_attribute("effort", "limit", "expected a number"))?;
    }
    if let Some(s) = get_attribute_opt(e, "velocity") {
        limit.velocity = s
            .parse()
            .map_err(|_| UrdfError::invalid_attribute("velocity", "limit", "expected a number"))?;
    }
    Ok(limit)
}

/// Parse a dynamics element. Every attribute is optional and falls back to
/// zero.
fn parse_joint_dynamics(e: &BytesStart) -> JointDynamics {
    JointDynamics {
        damping: parse_float_attr(e, "damping").unwrap_or(0.0),
        friction: parse_float_attr(e, "friction").unwrap_or(0.0),
        stiffness: parse_float_attr(e, "spring_stiffness").unwrap_or(0.0),
    }
}

/// Parse a mimic element. Without a `joint` attribute there is nothing to
/// follow, so the mimic is dropped with a warning.
fn parse_joint_mimic(e: &BytesStart, joint_name: &str) -> Option<JointMimic> {
    let Some(target) = get_attribute_opt(e, "joint") else {
        warn!(joint = %joint_name, "mimic names no joint, ignoring");
        return None;
    };
    Some(JointMimic {
        joint: sanitize_identifier(&target),
        multiplier: parse_float_attr(e, "multiplier").unwrap_or(1.0),
        offset: parse_float_attr(e, "offset").unwrap_or(0.0),
    })
}

/// Second joint pass: now that every joint exists, register each mimicking
/// joint in its target's `mimic_children` map. A mimic naming a missing
/// joint is dropped rather than fabricating an entry.
fn resolve_mimics(robot: &mut UrdfRobot) {
    let references: Vec<(String, String, f64)> = robot
        .joints
        .iter()
        .filter_map(|(name, joint)| {
            joint
                .mimic
                .as_ref()
                .map(|m| (name.clone(), m.joint.clone(), m.offset))
        })
        .collect();

    for (name, target, offset) in references {
        if robot.joints.contains_key(&target) {
            if let Some(target_joint) = robot.joints.get_mut(&target) {
                target_joint.mimic_children.insert(name, offset);
            }
        } else {
            warn!(joint = %name, target = %target, "mimic references an unknown joint, dropping");
            if let Some(joint) = robot.joints.get_mut(&name) {
                joint.mimic = None;
            }
        }
    }
}

// ============================================================================
// Loop joints and fixed frames
// ============================================================================

/// Parse a loop_joint element. Malformed loop joints are skipped with a
/// warning; they never fail the document.
fn parse_loop_joint<R: BufRead>(
    reader: &mut Reader<R>,
    start: &BytesStart,
) -> Result<Option<LoopJoint>> {
    let name = get_attribute_opt(start, "name").map(|s| sanitize_identifier(&s));
    let joint_type = match get_attribute_opt(start, "type") {
        Some(type_str) => {
            let parsed = JointType::from_str(&type_str);
            if parsed.is_none() {
                warn!(value = %type_str, "loop joint has an unknown type");
            }
            parsed
        }
        None => {
            warn!("loop joint has no type");
            None
        }
    };

    let mut attachments: [Option<(String, Transform)>; 2] = [None, None];
    let mut buf = Vec::new();

    loop {
        match reader.read_event_into(&mut buf) {
            Ok(Event::Start(ref e)) | Ok(Event::Empty(ref e)) => match e.name().as_ref() {
                b"link1" => attachments[0] = parse_loop_attachment(e),
                b"link2" => attachments[1] = parse_loop_attachment(e),
                _ => {}
            },
            Ok(Event::End(ref e)) if e.name().as_ref() == b"loop_joint" => break,
            Ok(Event::Eof) => {
                return Err(UrdfError::XmlParse("unexpected EOF in loop_joint".into()));
            }
            Ok(_) => {}
            Err(e) => return Err(UrdfError::XmlParse(e.to_string())),
        }
        buf.clear();
    }

    let Some(name) = name else {
        warn!("unnamed loop joint, skipping");
        return Ok(None);
    };
    let [Some((link1, pose1)), Some((link2, pose2))] = attachments else {
        warn!(loop_joint = %name, "loop joint is missing a link attachment, skipping");
        return Ok(None);
    };

    Ok(Some(LoopJoint {
        name,
        joint_type,
        link_names: [link1, link2],
        link_poses: [pose1, pose2],
    }))
}

/// One link attachment of a loop joint: a link reference with an inline
/// `xyz`/`rpy` pose on the same element.
fn parse_loop_attachment(e: &BytesStart) -> Option<(String, Transform)> {
    let link = get_attribute_opt(e, "link")?;
    let pose = Transform::from_xyz_rpy(
        vector3_attr_or_zeros(e, "xyz"),
        vector3_attr_or_zeros(e, "rpy"),
    );
    Some((sanitize_identifier(&link), pose))
}

/// Parse a fixed_frame element into `(frame name, parent link, origin)`.
/// Malformed frames are skipped with a warning.
fn parse_fixed_frame<R: BufRead>(
    reader: &mut Reader<R>,
    start: &BytesStart,
) -> Result<Option<(String, String, Transform)>> {
    let name = get_attribute_opt(start, "name").map(|s| sanitize_identifier(&s));
    let mut parent: Option<String> = None;
    let mut origin: Option<Transform> = None;
    let mut buf = Vec::new();

    loop {
        match reader.read_event_into(&mut buf) {
            Ok(Event::Start(ref e)) | Ok(Event::Empty(ref e)) => match e.name().as_ref() {
                b"parent" => {
                    parent = get_attribute_opt(e, "link").map(|s| sanitize_identifier(&s));
                }
                b"origin" => {
                    origin = Some(parse_origin_attrs(e));
                }
                _ => {}
            },
            Ok(Event::End(ref e)) if e.name().as_ref() == b"fixed_frame" => break,
            Ok(Event::Eof) => {
                return Err(UrdfError::XmlParse("unexpected EOF in fixed_frame".into()));
            }
            Ok(_) => {}
            Err(e) => return Err(UrdfError::XmlParse(e.to_string())),
        }
        buf.clear();
    }

    let Some(name) = name else {
        warn!("unnamed fixed frame, skipping");
        return Ok(None);
    };
    let Some(parent) = parent else {
        warn!(frame = %name, "fixed frame has no parent link, skipping");
        return Ok(None);
    };
    let origin = origin.unwrap_or_else(|| {
        warn!(frame = %name, "fixed frame has no origin, using identity");
        Transform::identity()
    });

    Ok(Some((name, parent, origin)))
}

/// Register collected fixed frames on their parent links' merged-children
/// maps. Frames naming an unknown link are dropped with a warning.
fn attach_fixed_frames(robot: &mut UrdfRobot, frames: Vec<(String, String, Transform)>) {
    for (frame, parent, origin) in frames {
        if let Some(link) = robot.links.get_mut(&parent) {
            link.merged_children.entry(frame).or_insert(origin);
        } else {
            warn!(frame = %frame, parent = %parent, "fixed frame parent link does not exist, skipping");
        }
    }
}

// ============================================================================
// Sensors
// ============================================================================

/// Image attributes of a camera sensor.
#[derive(Default)]
struct CameraImage {
    width: Option<f64>,
    height: Option<f64>,
    format: Option<String>,
    near: Option<f64>,
    far: Option<f64>,
    hfov: Option<f64>,
}

/// Parse a sensor element. Camera and ray sensors are supported; anything
/// else, and any sensor missing its name or parent, is skipped with a
/// warning.
fn parse_sensor<R: BufRead>(
    reader: &mut Reader<R>,
    start: &BytesStart,
) -> Result<Option<(String, SensorKind)>> {
    let name = get_attribute_opt(start, "name").map(|s| sanitize_identifier(&s));
    let sensor_type = get_attribute_opt(start, "type");
    let update_rate = parse_float_attr(start, "update_rate");
    let config = get_attribute_opt(start, "isaac_sim_config");

    let mut parent: Option<String> = None;
    let mut origin = Transform::identity();
    let mut image: Option<CameraImage> = None;
    let mut scan: Option<(Option<LidarDimensions>, Option<LidarDimensions>)> = None;
    let mut buf = Vec::new();

    loop {
        match reader.read_event_into(&mut buf) {
            Ok(Event::Start(ref e)) => {
                let elem_name = e.name().as_ref().to_vec();
                match elem_name.as_slice() {
                    b"parent" => {
                        parent = get_attribute_opt(e, "link").map(|s| sanitize_identifier(&s));
                    }
                    b"origin" => origin = parse_origin_attrs(e),
                    b"camera" => image = Some(parse_camera_image(reader)?),
                    b"ray" => scan = Some(parse_scan_planes(reader)?),
                    _ => skip_element(reader, &elem_name)?,
                }
            }
            Ok(Event::Empty(ref e)) => match e.name().as_ref() {
                b"parent" => {
                    parent = get_attribute_opt(e, "link").map(|s| sanitize_identifier(&s));
                }
                b"origin" => origin = parse_origin_attrs(e),
                b"camera" => image = Some(CameraImage::default()),
                b"ray" => scan = Some((None, None)),
                _ => {}
            },
            Ok(Event::End(ref e)) if e.name().as_ref() == b"sensor" => break,
            Ok(Event::Eof) => return Err(UrdfError::XmlParse("unexpected EOF in sensor".into())),
            Ok(_) => {}
            Err(e) => return Err(UrdfError::XmlParse(e.to_string())),
        }
        buf.clear();
    }

    let Some(name) = name else {
        warn!("sensor has no name, skipping");
        return Ok(None);
    };
    let Some(parent) = parent else {
        warn!(sensor = %name, "sensor has no parent link, skipping");
        return Ok(None);
    };

    match sensor_type.as_deref() {
        Some("camera") => {
            let Some(image) = image else {
                warn!(sensor = %name, "camera sensor has no camera element, skipping");
                return Ok(None);
            };
            let clip_near = image.near.unwrap_or(0.0);
            let clip_far = image.far.unwrap_or(1000.0).max(clip_near);
            let camera = Camera {
                name,
                origin,
                update_rate: update_rate.unwrap_or(30.0),
                width: image.width.unwrap_or(0.0),
                height: image.height.unwrap_or(0.0),
                format: image.format,
                hfov: image.hfov.unwrap_or(0.0),
                clip_near,
                clip_far,
            };
            Ok(Some((parent, SensorKind::Camera(camera))))
        }
        Some("ray") => {
            let (horizontal, vertical) = scan.unwrap_or((None, None));
            let lidar = Lidar {
                name,
                origin,
                update_rate: update_rate.unwrap_or(0.0),
                config,
                horizontal,
                vertical,
            };
            Ok(Some((parent, SensorKind::Lidar(lidar))))
        }
        other => {
            warn!(
                sensor = %name,
                sensor_type = other.unwrap_or("missing"),
                "unsupported sensor type, skipping"
            );
            Ok(None)
        }
    }
}

/// Parse the image attributes inside a sensor's camera element.
fn parse_camera_image<R: BufRead>(reader: &mut Reader<R>) -> Result<CameraImage> {
    let mut image = CameraImage::default();
    let mut buf = Vec::new();

    loop {
        match reader.read_event_into(&mut buf) {
            Ok(Event::Start(ref e)) | Ok(Event::Empty(ref e)) => {
                if e.name().as_ref() == b"image" {
                    image.width = parse_float_attr(e, "width");
                    image.height = parse_float_attr(e, "height");
                    image.format = get_attribute_opt(e, "format");
                    image.near = parse_float_attr(e, "near");
                    image.far = parse_float_attr(e, "far");
                    image.hfov = parse_float_attr(e, "hfov");
                }
            }
            Ok(Event::End(ref e)) if e.name().as_ref() == b"camera" => break,
            Ok(Event::Eof) => return Err(UrdfError::XmlParse("unexpected EOF in camera".into())),
            Ok(_) => {}
            Err(e) => return Err(UrdfError::XmlParse(e.to_string())),
        }
        buf.clear();
    }

    Ok(image)
}

/// Parse the horizontal/vertical scan planes inside a sensor's ray element.
fn parse_scan_planes<R: BufRead>(
    reader: &mut Reader<R>,
) -> Result<(Option<LidarDimensions>, Option<LidarDimensions>)> {
    let mut horizontal: Option<LidarDimensions> = None;
    let mut vertical: Option<LidarDimensions> = None;
    let mut buf = Vec::new();

    loop {
        match reader.read_event_into(&mut buf) {
            Ok(Event::Start(ref e)) | Ok(Event::Empty(ref e)) => match e.name().as_ref() {
                b"horizontal" => horizontal = Some(parse_ray_dimensions(e)),
                b"vertical" => vertical = Some(parse_ray_dimensions(e)),
                _ => {}
            },
            Ok(Event::End(ref e)) if e.name().as_ref() == b"ray" => break,
            Ok(Event::Eof) => return Err(UrdfError::XmlParse("unexpected EOF in ray".into())),
            Ok(_) => {}
            Err(e) => return Err(UrdfError::XmlParse(e.to_string())),
        }
        buf.clear();
    }

    Ok((horizontal, vertical))
}

/// One scan plane; every attribute is optional and falls back to zero.
fn parse_ray_dimensions(e: &BytesStart) -> LidarDimensions {
    LidarDimensions {
        samples: get_attribute_opt(e, "samples")
            .and_then(|s| s.parse().ok())
            .unwrap_or(0),
        resolution: parse_float_attr(e, "resolution").unwrap_or(0.0),
        min_angle: parse_float_attr(e, "min_angle").unwrap_or(0.0),
        max_angle: parse_float_attr(e, "max_angle").unwrap_or(0.0),
    }
}

/// Parse a mujoco_camera element: `fovy` is read as the field of view, the
/// pose is flipped half a turn about Y to match the camera convention of the
/// rest of the model, and the clip range is fixed.
fn parse_mujoco_camera<R: BufRead>(
    reader: &mut Reader<R>,
    start: &BytesStart,
) -> Result<Option<(String, Camera)>> {
    let name = get_attribute_opt(start, "name").map(|s| sanitize_identifier(&s));
    let hfov = parse_float_attr(start, "fovy").unwrap_or(0.0);
    let resolution = get_attribute_opt(start, "resolution").and_then(|s| parse_float_pair(&s));

    let mut parent: Option<String> = None;
    let mut origin = Transform::identity();
    let mut buf = Vec::new();

    loop {
        match reader.read_event_into(&mut buf) {
            Ok(Event::Start(ref e)) | Ok(Event::Empty(ref e)) => match e.name().as_ref() {
                b"parent" => {
                    parent = get_attribute_opt(e, "link").map(|s| sanitize_identifier(&s));
                }
                b"origin" => origin = parse_origin_attrs(e),
                _ => {}
            },
            Ok(Event::End(ref e)) if e.name().as_ref() == b"mujoco_camera" => break,
            Ok(Event::Eof) => {
                return Err(UrdfError::XmlParse("unexpected EOF in mujoco_camera".into()));
            }
            Ok(_) => {}
            Err(e) => return Err(UrdfError::XmlParse(e.to_string())),
        }
        buf.clear();
    }

    let Some(name) = name else {
        warn!("mujoco camera has no name, skipping");
        return Ok(None);
    };
    let Some(parent) = parent else {
        warn!(sensor = %name, "mujoco camera has no parent link, skipping");
        return Ok(None);
    };

    let flip = UnitQuaternion::from_quaternion(Quaternion::new(0.0, 0.0, 1.0, 0.0));
    let (width, height) = resolution.unwrap_or((0.0, 0.0));
    let camera = Camera {
        name,
        origin: Transform::new(origin.position, origin.rotation * flip),
        update_rate: 30.0,
        width,
        height,
        format: None,
        hfov,
        clip_near: 0.01,
        clip_far: 1000.0,
    };

    Ok(Some((parent, camera)))
}

/// Attach collected sensors to their parent links. Sensors naming an
/// unknown link are dropped with a warning.
fn attach_sensors(robot: &mut UrdfRobot, sensors: Vec<(String, SensorKind)>) {
    for (parent, sensor) in sensors {
        let Some(link) = robot.links.get_mut(&parent) else {
            warn!(parent = %parent, "sensor parent link does not exist, skipping");
            continue;
        };
        match sensor {
            SensorKind::Camera(camera) => link.cameras.push(camera),
            SensorKind::Lidar(lidar) => link.lidars.push(lidar),
        }
    }
}

// ============================================================================
// Post-parse linkage
// ============================================================================

/// Fill each joint's `parent_joint` and `children_joints` from the child
/// link -> joint map, validating every link reference on the way. A link
/// claimed as child by two joints is a structural error.
fn populate_joint_tree(robot: &mut UrdfRobot) -> Result<()> {
    let mut child_to_joint: BTreeMap<String, String> = BTreeMap::new();

    for (joint_name, joint) in &robot.joints {
        if !robot.links.contains_key(&joint.parent_link_name) {
            return Err(UrdfError::undefined_link(&joint.parent_link_name, joint_name));
        }
        if !robot.links.contains_key(&joint.child_link_name) {
            return Err(UrdfError::undefined_link(&joint.child_link_name, joint_name));
        }
        if let Some(first) = child_to_joint.insert(joint.child_link_name.clone(), joint_name.clone())
        {
            return Err(UrdfError::duplicate_child_link(
                &joint.child_link_name,
                first,
                joint_name,
            ));
        }
    }

    let joint_names: Vec<String> = robot.joints.keys().cloned().collect();
    for joint_name in &joint_names {
        let parent_link = match robot.joints.get(joint_name) {
            Some(joint) => joint.parent_link_name.clone(),
            None => continue,
        };
        if let Some(parent_joint) = child_to_joint.get(&parent_link).cloned() {
            if let Some(joint) = robot.joints.get_mut(joint_name) {
                joint.parent_joint = Some(parent_joint.clone());
            }
            if let Some(parent) = robot.joints.get_mut(&parent_joint) {
                parent.children_joints.push(joint_name.clone());
            }
        }
    }

    Ok(())
}

// ============================================================================
// Helper functions
// ============================================================================

/// Get a required attribute value.
fn get_attribute(e: &BytesStart, name: &'static str) -> Result<String> {
    for attr in e.attributes().flatten() {
        if attr.key.as_ref() == name.as_bytes() {
            return String::from_utf8(attr.value.to_vec())
                .map_err(|_| UrdfError::invalid_attribute(name, element_name(e), "invalid UTF-8"));
        }
    }
    Err(UrdfError::missing_attribute(name, element_name(e)))
}

/// Get an optional attribute value.
fn get_attribute_opt(e: &BytesStart, name: &str) -> Option<String> {
    for attr in e.attributes().flatten() {
        if attr.key.as_ref() == name.as_bytes() {
            return String::from_utf8(attr.value.to_vec()).ok();
        }
    }
    None
}

/// Parse a float attribute, returning None if not present or invalid.
fn parse_float_attr(e: &BytesStart, name: &str) -> Option<f64> {
    get_attribute_opt(e, name).and_then(|s| s.parse().ok())
}

/// Parse a mandatory float attribute.
fn require_float_attr(e: &BytesStart, name: &'static str) -> Result<f64> {
    let value = get_attribute(e, name)?;
    value
        .parse()
        .map_err(|_| UrdfError::invalid_attribute(name, element_name(e), "expected a number"))
}

/// Parse a space-separated vector3 string.
fn parse_vector3(s: &str) -> Result<Vector3<f64>> {
    let parts: Vec<f64> = s
        .split_whitespace()
        .map(str::parse::<f64>)
        .collect::<std::result::Result<Vec<_>, _>>()
        .map_err(|_| UrdfError::XmlParse(format!("invalid vector3: {s}")))?;

    if parts.len() != 3 {
        return Err(UrdfError::XmlParse(format!(
            "expected 3 values in vector, got {}: {s}",
            parts.len()
        )));
    }

    Ok(Vector3::new(parts[0], parts[1], parts[2]))
}

/// Vector3 attribute with the permissive fallback: missing or unreadable
/// values become the zero vector.
fn vector3_attr_or_zeros(e: &BytesStart, name: &str) -> Vector3<f64> {
    match get_attribute_opt(e, name) {
        Some(s) => parse_vector3(&s).unwrap_or_else(|_| {
            debug!(attribute = name, value = %s, "unreadable vector, using zeros");
            Vector3::zeros()
        }),
        None => Vector3::zeros(),
    }
}

/// Origin from `xyz`/`rpy` attributes, each falling back to zeros.
fn parse_origin_attrs(e: &BytesStart) -> Transform {
    Transform::from_xyz_rpy(
        vector3_attr_or_zeros(e, "xyz"),
        vector3_attr_or_zeros(e, "rpy"),
    )
}

/// Parse a whitespace-separated rgba color string.
fn parse_color(s: &str) -> Result<Color> {
    let parts: Vec<f64> = s
        .split_whitespace()
        .map(str::parse::<f64>)
        .collect::<std::result::Result<Vec<_>, _>>()
        .map_err(|_| UrdfError::XmlParse(format!("invalid rgba color: {s}")))?;

    if parts.len() != 4 {
        return Err(UrdfError::XmlParse(format!(
            "expected 4 values in rgba color, got {}: {s}",
            parts.len()
        )));
    }

    Ok(Color::rgba(parts[0], parts[1], parts[2], parts[3]))
}

/// Parse two whitespace-separated floats.
fn parse_float_pair(s: &str) -> Option<(f64, f64)> {
    let mut it = s.split_whitespace().map(str::parse::<f64>);
    match (it.next(), it.next(), it.next()) {
        (Some(Ok(a)), Some(Ok(b)), None) => Some((a, b)),
        _ => None,
    }
}

/// Get element name as string for error messages.
fn element_name(e: &BytesStart) -> String {
    String::from_utf8_lossy(e.name().as_ref()).to_string()
}

/// Context string for error messages: `kind 'name'` when the name is known.
fn element_context(kind: &str, name: Option<&str>) -> String {
    match name {
        Some(n) => format!("{kind} '{n}'"),
        None => kind.to_string(),
    }
}

/// Skip an element and all its children.
fn skip_element<R: BufRead>(reader: &mut Reader<R>, name: &[u8]) -> Result<()> {
    let mut buf = Vec::new();
    let mut depth = 1;

    loop {
        match reader.read_event_into(&mut buf) {
            Ok(Event::Start(ref e)) if e.name().as_ref() == name => {
                depth += 1;
            }
            Ok(Event::End(ref e)) if e.name().as_ref() == name => {
                depth -= 1;
                if depth == 0 {
                    break;
                }
            }
            Ok(Event::Eof) => break,
            Ok(_) => {}
            Err(e) => return Err(UrdfError::XmlParse(e.to_string())),
        }
        buf.clear();
    }

    Ok(())
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_parse_simple_robot() {
        let xml = r#"
            <robot name="test_robot">
                <link name="base_link">
                    <inertial>
                        <mass value="1.0"/>
                        <inertia ixx="0.1" ixy="0" ixz="0" iyy="0.1" iyz="0" izz="0.1"/>
                    </inertial>
                </link>
                <link name="link1"/>
                <joint name="j1" type="fixed">
                    <parent link="base_link"/>
                    <child link="link1"/>
                </joint>
            </robot>
        "#;

        let robot = parse_urdf_str(xml).expect("should parse");
        assert_eq!(robot.name, "test_robot");
        assert_eq!(robot.links.len(), 2);
        assert_eq!(robot.root_link_name, "base_link");

        let base = robot.link("base_link").expect("base_link should exist");
        assert_eq!(base.inertial.mass, Some(1.0));
        let inertia = base.inertial.inertia.expect("should have inertia");
        assert_relative_eq!(inertia.ixx, 0.1, epsilon = 1e-10);
        assert!(base.inertial.origin.is_none());
    }

    #[test]
    fn test_parse_joint_full() {
        let xml = r#"
            <robot name="test">
                <link name="base"/>
                <link name="arm"/>
                <joint name="j1" type="revolute" dont_collapse="true">
                    <parent link="base"/>
                    <child link="arm"/>
                    <origin xyz="0 0 0.5" rpy="0 0 1.5707963267948966"/>
                    <axis xyz="0 1 0"/>
                    <limit lower="-1.57" upper="1.57" effort="10" velocity="2"/>
                    <dynamics damping="0.7" friction="0.1" spring_stiffness="3"/>
                </joint>
            </robot>
        "#;

        let robot = parse_urdf_str(xml).expect("should parse");
        let joint = robot.joint("j1").expect("j1 should exist");
        assert_eq!(joint.joint_type, JointType::Revolute);
        assert_eq!(joint.parent_link_name, "base");
        assert_eq!(joint.child_link_name, "arm");
        assert!(joint.dont_collapse);
        assert_relative_eq!(joint.origin.position.z, 0.5, epsilon = 1e-10);
        assert_relative_eq!(joint.axis.y, 1.0, epsilon = 1e-10);
        assert_relative_eq!(joint.limit.lower, -1.57, epsilon = 1e-10);
        assert_relative_eq!(joint.limit.upper, 1.57, epsilon = 1e-10);
        assert_relative_eq!(joint.limit.effort, 10.0, epsilon = 1e-10);
        assert_relative_eq!(joint.dynamics.damping, 0.7, epsilon = 1e-10);
        assert_relative_eq!(joint.dynamics.stiffness, 3.0, epsilon = 1e-10);
    }

    #[test]
    fn test_names_sanitized_consistently() {
        let xml = r#"
            <robot name="my robot!">
                <link name="base link"/>
                <link name="1st_arm"/>
                <joint name="j-1" type="fixed">
                    <parent link="base link"/>
                    <child link="1st_arm"/>
                </joint>
            </robot>
        "#;

        let robot = parse_urdf_str(xml).expect("should parse");
        assert_eq!(robot.name, "my_robot_");
        assert!(robot.link("base_link").is_some());
        assert!(robot.link("a_1st_arm").is_some());
        let joint = robot.joint("j_1").expect("sanitized joint name");
        assert_eq!(joint.parent_link_name, "base_link");
        assert_eq!(joint.child_link_name, "a_1st_arm");
        assert_eq!(robot.root_link_name, "base_link");
    }

    #[test]
    fn test_robot_name_optional() {
        let xml = r#"<robot><link name="base"/></robot>"#;
        let robot = parse_urdf_str(xml).expect("should parse");
        assert_eq!(robot.name, "");
        assert_eq!(robot.root_link_name, "base");
    }

    #[test]
    fn test_unnamed_link_rejected() {
        let xml = r#"<robot name="r"><link/></robot>"#;
        let result = parse_urdf_str(xml);
        assert!(matches!(result, Err(UrdfError::MissingAttribute { .. })));
    }

    #[test]
    fn test_duplicate_link_rejected() {
        let xml = r#"
            <robot name="r">
                <link name="base"/>
                <link name="base"/>
            </robot>
        "#;
        let result = parse_urdf_str(xml);
        assert!(matches!(result, Err(UrdfError::DuplicateLink(name)) if name == "base"));
    }

    #[test]
    fn test_joint_missing_type_rejected() {
        let xml = r#"
            <robot name="r">
                <link name="a"/>
                <link name="b"/>
                <joint name="j">
                    <parent link="a"/>
                    <child link="b"/>
                </joint>
            </robot>
        "#;
        let result = parse_urdf_str(xml);
        assert!(matches!(result, Err(UrdfError::MissingAttribute { .. })));
    }

    #[test]
    fn test_unknown_joint_type_rejected() {
        let xml = r#"
            <robot name="r">
                <link name="a"/>
                <link name="b"/>
                <joint name="j" type="helical">
                    <parent link="a"/>
                    <child link="b"/>
                </joint>
            </robot>
        "#;
        let result = parse_urdf_str(xml);
        assert!(matches!(result, Err(UrdfError::UnknownJointType(t)) if t == "helical"));
    }

    #[test]
    fn test_revolute_requires_limit() {
        let xml = r#"
            <robot name="r">
                <link name="a"/>
                <link name="b"/>
                <joint name="j" type="revolute">
                    <parent link="a"/>
                    <child link="b"/>
                </joint>
            </robot>
        "#;
        let result = parse_urdf_str(xml);
        assert!(
            matches!(result, Err(UrdfError::MissingElement { element, .. }) if element == "limit")
        );

        // A fixed joint does not need one.
        let xml = r#"
            <robot name="r">
                <link name="a"/>
                <link name="b"/>
                <joint name="j" type="fixed">
                    <parent link="a"/>
                    <child link="b"/>
                </joint>
            </robot>
        "#;
        parse_urdf_str(xml).expect("fixed joint without limit should parse");
    }

    #[test]
    fn test_limit_fallbacks_and_hard_errors() {
        let xml = r#"
            <robot name="r">
                <link name="a"/>
                <link name="b"/>
                <joint name="j" type="revolute">
                    <parent link="a"/>
                    <child link="b"/>
                    <limit lower="bogus" effort="5" velocity="1"/>
                </joint>
            </robot>
        "#;
        let robot = parse_urdf_str(xml).expect("should parse");
        let limit = robot.joint("j").expect("joint").limit;
        assert_relative_eq!(limit.lower, 0.0);
        assert_eq!(limit.upper, f64::MAX);
        assert_relative_eq!(limit.effort, 5.0);

        let xml = r#"
            <robot name="r">
                <link name="a"/>
                <link name="b"/>
                <joint name="j" type="revolute">
                    <parent link="a"/>
                    <child link="b"/>
                    <limit effort="lots" velocity="1"/>
                </joint>
            </robot>
        "#;
        let result = parse_urdf_str(xml);
        assert!(matches!(result, Err(UrdfError::InvalidAttribute { .. })));
    }

    #[test]
    fn test_bad_axis_rejected() {
        let xml = r#"
            <robot name="r">
                <link name="a"/>
                <link name="b"/>
                <joint name="j" type="fixed">
                    <parent link="a"/>
                    <child link="b"/>
                    <axis xyz="1 0"/>
                </joint>
            </robot>
        "#;
        let result = parse_urdf_str(xml);
        assert!(matches!(result, Err(UrdfError::InvalidAttribute { .. })));
    }

    #[test]
    fn test_geometry_shapes() {
        let xml = r#"
            <robot name="r">
                <link name="base">
                    <visual>
                        <geometry><box size="1 2 3"/></geometry>
                    </visual>
                    <visual>
                        <geometry><cylinder radius="0.5" length="2"/></geometry>
                    </visual>
                    <visual>
                        <geometry><capsule radius="0.25" length="1"/></geometry>
                    </visual>
                    <collision>
                        <geometry><sphere radius="0.1"/></geometry>
                    </collision>
                    <collision>
                        <geometry><mesh filename="meshes/base.obj" scale="1 1 2"/></geometry>
                    </collision>
                </link>
            </robot>
        "#;

        let robot = parse_urdf_str(xml).expect("should parse");
        let base = robot.link("base").expect("base");
        assert_eq!(base.visuals.len(), 3);
        assert_eq!(base.collisions.len(), 2);

        match &base.visuals[0].geometry {
            Geometry::Box { size } => assert_relative_eq!(size.z, 3.0),
            other => panic!("expected box, got {other:?}"),
        }
        match &base.visuals[2].geometry {
            Geometry::Capsule { radius, length } => {
                assert_relative_eq!(*radius, 0.25);
                assert_relative_eq!(*length, 1.0);
            }
            other => panic!("expected capsule, got {other:?}"),
        }
        match &base.collisions[1].geometry {
            Geometry::Mesh { filename, scale } => {
                assert_eq!(filename, "meshes/base.obj");
                let scale = scale.expect("scale present");
                assert_relative_eq!(scale.z, 2.0);
            }
            other => panic!("expected mesh, got {other:?}"),
        }
    }

    #[test]
    fn test_visual_requires_geometry() {
        let xml = r#"
            <robot name="r">
                <link name="base">
                    <visual>
                        <origin xyz="0 0 0"/>
                    </visual>
                </link>
            </robot>
        "#;
        let result = parse_urdf_str(xml);
        assert!(matches!(result, Err(UrdfError::MissingGeometry { .. })));
    }

    #[test]
    fn test_unknown_geometry_shape_rejected() {
        let xml = r#"
            <robot name="r">
                <link name="base">
                    <collision>
                        <geometry><trimesh filename="x.obj"/></geometry>
                    </collision>
                </link>
            </robot>
        "#;
        let result = parse_urdf_str(xml);
        assert!(matches!(result, Err(UrdfError::XmlParse(msg)) if msg.contains("trimesh")));
    }

    #[test]
    fn test_mesh_requires_filename() {
        let xml = r#"
            <robot name="r">
                <link name="base">
                    <collision>
                        <geometry><mesh scale="1 1 1"/></geometry>
                    </collision>
                </link>
            </robot>
        "#;
        let result = parse_urdf_str(xml);
        assert!(
            matches!(result, Err(UrdfError::MissingAttribute { attribute, .. }) if attribute == "filename")
        );
    }

    #[test]
    fn test_inertia_requires_all_components() {
        let xml = r#"
            <robot name="r">
                <link name="base">
                    <inertial>
                        <mass value="1"/>
                        <inertia ixx="1" ixy="0" ixz="0" iyy="1" iyz="0"/>
                    </inertial>
                </link>
            </robot>
        "#;
        let result = parse_urdf_str(xml);
        assert!(
            matches!(result, Err(UrdfError::MissingAttribute { attribute, .. }) if attribute == "izz")
        );
    }

    #[test]
    fn test_mass_requires_value() {
        let xml = r#"
            <robot name="r">
                <link name="base">
                    <inertial><mass/></inertial>
                </link>
            </robot>
        "#;
        let result = parse_urdf_str(xml);
        assert!(
            matches!(result, Err(UrdfError::MissingAttribute { attribute, .. }) if attribute == "value")
        );
    }

    #[test]
    fn test_inertial_fields_independent() {
        let xml = r#"
            <robot name="r">
                <link name="base">
                    <inertial>
                        <origin xyz="0.1 0 0"/>
                        <mass value="2"/>
                    </inertial>
                </link>
            </robot>
        "#;
        let robot = parse_urdf_str(xml).expect("should parse");
        let inertial = robot.link("base").expect("base").inertial;
        assert_eq!(inertial.mass, Some(2.0));
        assert!(inertial.inertia.is_none());
        let origin = inertial.origin.expect("origin present");
        assert_relative_eq!(origin.position.x, 0.1, epsilon = 1e-10);
    }

    #[test]
    fn test_top_level_materials() {
        let xml = r#"
            <robot name="r">
                <material name="steel">
                    <color rgba="0.8 0.8 0.8 1"/>
                    <texture filename="textures/steel.png"/>
                </material>
                <material name="bare"/>
                <link name="base"/>
            </robot>
        "#;
        let robot = parse_urdf_str(xml).expect("should parse");
        assert_eq!(robot.materials.len(), 2);
        let steel = robot.materials.get("steel").expect("steel");
        let color = steel.color.expect("color");
        assert_relative_eq!(color.r, 0.8);
        assert_relative_eq!(color.a, 1.0);
        assert_eq!(steel.texture_file.as_deref(), Some("textures/steel.png"));
        assert!(robot.materials.get("bare").expect("bare").color.is_none());
    }

    #[test]
    fn test_unnamed_top_level_material_rejected() {
        let xml = r#"
            <robot name="r">
                <material>
                    <color rgba="1 0 0 1"/>
                </material>
                <link name="base"/>
            </robot>
        "#;
        let result = parse_urdf_str(xml);
        assert!(
            matches!(result, Err(UrdfError::MissingAttribute { attribute, .. }) if attribute == "name")
        );
    }

    #[test]
    fn test_duplicate_material_rejected() {
        let xml = r#"
            <robot name="r">
                <material name="m"><color rgba="1 0 0 1"/></material>
                <material name="m"><color rgba="0 1 0 1"/></material>
                <link name="base"/>
            </robot>
        "#;
        let result = parse_urdf_str(xml);
        assert!(matches!(result, Err(UrdfError::DuplicateMaterial(name)) if name == "m"));
    }

    #[test]
    fn test_inline_material() {
        let xml = r#"
            <robot name="r">
                <material name="red"><color rgba="1 0 0 1"/></material>
                <link name="base">
                    <visual>
                        <geometry><sphere radius="1"/></geometry>
                        <material name="red">
                            <color rgba="0 0 1 1"/>
                        </material>
                    </visual>
                    <visual>
                        <geometry><sphere radius="1"/></geometry>
                        <material>
                            <color rgba="0 1 0 0.5"/>
                        </material>
                    </visual>
                </link>
            </robot>
        "#;
        let robot = parse_urdf_str(xml).expect("should parse");
        let base = robot.link("base").expect("base");

        // A named inline material is a reference; its own color is ignored.
        let named = base.visuals[0].material.as_ref().expect("material");
        assert_eq!(named.name.as_deref(), Some("red"));
        assert!(named.color.is_none());

        let inline = base.visuals[1].material.as_ref().expect("material");
        assert!(inline.name.is_none());
        let color = inline.color.expect("color");
        assert_relative_eq!(color.g, 1.0);
        assert_relative_eq!(color.a, 0.5);
    }

    #[test]
    fn test_mimic_resolution() {
        let xml = r#"
            <robot name="r">
                <link name="base"/>
                <link name="a"/>
                <link name="b"/>
                <joint name="j1" type="revolute">
                    <parent link="base"/>
                    <child link="a"/>
                    <limit effort="1" velocity="1"/>
                </joint>
                <joint name="j2" type="revolute">
                    <parent link="a"/>
                    <child link="b"/>
                    <limit effort="1" velocity="1"/>
                    <mimic joint="j1" multiplier="-1" offset="0.25"/>
                </joint>
            </robot>
        "#;
        let robot = parse_urdf_str(xml).expect("should parse");
        let mimic = robot.joint("j2").expect("j2").mimic.clone().expect("mimic");
        assert_eq!(mimic.joint, "j1");
        assert_relative_eq!(mimic.multiplier, -1.0);
        assert_relative_eq!(mimic.offset, 0.25);

        let driver = robot.joint("j1").expect("j1");
        assert_eq!(driver.mimic_children.get("j2"), Some(&0.25));
    }

    #[test]
    fn test_mimic_defaults() {
        let xml = r#"
            <robot name="r">
                <link name="base"/>
                <link name="a"/>
                <link name="b"/>
                <joint name="j1" type="fixed">
                    <parent link="base"/>
                    <child link="a"/>
                </joint>
                <joint name="j2" type="fixed">
                    <parent link="a"/>
                    <child link="b"/>
                    <mimic joint="j1"/>
                </joint>
            </robot>
        "#;
        let robot = parse_urdf_str(xml).expect("should parse");
        let mimic = robot.joint("j2").expect("j2").mimic.clone().expect("mimic");
        assert_relative_eq!(mimic.multiplier, 1.0);
        assert_relative_eq!(mimic.offset, 0.0);
        assert_eq!(robot.joint("j1").expect("j1").mimic_children.get("j2"), Some(&0.0));
    }

    #[test]
    fn test_mimic_unknown_target_dropped() {
        let xml = r#"
            <robot name="r">
                <link name="base"/>
                <link name="a"/>
                <joint name="j1" type="fixed">
                    <parent link="base"/>
                    <child link="a"/>
                    <mimic joint="phantom"/>
                </joint>
            </robot>
        "#;
        let robot = parse_urdf_str(xml).expect("should parse");
        assert!(robot.joint("j1").expect("j1").mimic.is_none());
    }

    #[test]
    fn test_loop_joint_parsed_and_malformed_skipped() {
        let xml = r#"
            <robot name="r">
                <link name="base"/>
                <link name="crank"/>
                <joint name="j1" type="continuous">
                    <parent link="base"/>
                    <child link="crank"/>
                </joint>
                <loop_joint name="closure" type="spherical">
                    <link1 link="base" xyz="0.1 0 0" rpy="0 0 0"/>
                    <link2 link="crank" xyz="0 0.2 0"/>
                </loop_joint>
                <loop_joint name="half">
                    <link1 link="base"/>
                </loop_joint>
            </robot>
        "#;
        let robot = parse_urdf_str(xml).expect("should parse");
        assert_eq!(robot.loop_joints.len(), 1);
        let closure = robot.loop_joints.get("closure").expect("closure");
        assert_eq!(closure.joint_type, Some(JointType::Spherical));
        assert_eq!(closure.link_names, ["base".to_string(), "crank".to_string()]);
        assert_relative_eq!(closure.link_poses[0].position.x, 0.1, epsilon = 1e-10);
        assert_relative_eq!(closure.link_poses[1].position.y, 0.2, epsilon = 1e-10);
    }

    #[test]
    fn test_fixed_frame_registered() {
        let xml = r#"
            <robot name="r">
                <link name="base"/>
                <fixed_frame name="tool_tip">
                    <parent link="base"/>
                    <origin xyz="0 0 0.3"/>
                </fixed_frame>
                <fixed_frame name="no_origin">
                    <parent link="base"/>
                </fixed_frame>
                <fixed_frame name="orphan">
                    <parent link="ghost"/>
                </fixed_frame>
            </robot>
        "#;
        let robot = parse_urdf_str(xml).expect("should parse");
        let base = robot.link("base").expect("base");
        assert_eq!(base.merged_children.len(), 2);
        let tip = base.merged_children.get("tool_tip").expect("tool_tip");
        assert_relative_eq!(tip.position.z, 0.3, epsilon = 1e-10);
        assert_eq!(
            base.merged_children.get("no_origin"),
            Some(&Transform::identity())
        );
    }

    #[test]
    fn test_camera_sensor() {
        let xml = r#"
            <robot name="r">
                <link name="head"/>
                <sensor name="eye" type="camera" update_rate="60">
                    <parent link="head"/>
                    <origin xyz="0.05 0 0"/>
                    <camera>
                        <image width="640" height="480" format="rgb8" near="0.1" far="50" hfov="1.2"/>
                    </camera>
                </sensor>
            </robot>
        "#;
        let robot = parse_urdf_str(xml).expect("should parse");
        let head = robot.link("head").expect("head");
        assert_eq!(head.cameras.len(), 1);
        let camera = &head.cameras[0];
        assert_eq!(camera.name, "eye");
        assert_relative_eq!(camera.update_rate, 60.0);
        assert_relative_eq!(camera.width, 640.0);
        assert_relative_eq!(camera.height, 480.0);
        assert_eq!(camera.format.as_deref(), Some("rgb8"));
        assert_relative_eq!(camera.clip_near, 0.1);
        assert_relative_eq!(camera.clip_far, 50.0);
        assert_relative_eq!(camera.hfov, 1.2);
        assert_relative_eq!(camera.origin.position.x, 0.05, epsilon = 1e-10);
    }

    #[test]
    fn test_camera_defaults_and_clip_clamp() {
        let xml = r#"
            <robot name="r">
                <link name="head"/>
                <sensor name="eye" type="camera">
                    <parent link="head"/>
                    <camera>
                        <image near="10" far="2"/>
                    </camera>
                </sensor>
            </robot>
        "#;
        let robot = parse_urdf_str(xml).expect("should parse");
        let camera = &robot.link("head").expect("head").cameras[0];
        assert_relative_eq!(camera.update_rate, 30.0);
        assert_relative_eq!(camera.width, 0.0);
        // Far clip never drops below near.
        assert_relative_eq!(camera.clip_near, 10.0);
        assert_relative_eq!(camera.clip_far, 10.0);
    }

    #[test]
    fn test_ray_sensor() {
        let xml = r#"
            <robot name="r">
                <link name="mast"/>
                <sensor name="scanner" type="ray" update_rate="10" isaac_sim_config="cfg/lidar.json">
                    <parent link="mast"/>
                    <ray>
                        <horizontal samples="720" resolution="1" min_angle="-3.14" max_angle="3.14"/>
                        <vertical samples="16" resolution="0.5" min_angle="-0.26" max_angle="0.26"/>
                    </ray>
                </sensor>
            </robot>
        "#;
        let robot = parse_urdf_str(xml).expect("should parse");
        let mast = robot.link("mast").expect("mast");
        assert_eq!(mast.lidars.len(), 1);
        let lidar = &mast.lidars[0];
        assert_eq!(lidar.name, "scanner");
        assert_relative_eq!(lidar.update_rate, 10.0);
        assert_eq!(lidar.config.as_deref(), Some("cfg/lidar.json"));
        let horizontal = lidar.horizontal.expect("horizontal");
        assert_eq!(horizontal.samples, 720);
        assert_relative_eq!(horizontal.max_angle, 3.14);
        let vertical = lidar.vertical.expect("vertical");
        assert_eq!(vertical.samples, 16);
    }

    #[test]
    fn test_unsupported_sensor_skipped() {
        let xml = r#"
            <robot name="r">
                <link name="base"/>
                <sensor name="imu0" type="imu">
                    <parent link="base"/>
                </sensor>
                <sensor name="cam0" type="camera">
                    <parent link="ghost"/>
                    <camera><image width="64" height="64"/></camera>
                </sensor>
            </robot>
        "#;
        let robot = parse_urdf_str(xml).expect("should parse");
        let base = robot.link("base").expect("base");
        assert!(base.cameras.is_empty());
        assert!(base.lidars.is_empty());
    }

    #[test]
    fn test_mujoco_camera() {
        let xml = r#"
            <robot name="r">
                <link name="head"/>
                <mujoco_camera name="tracking" fovy="45" resolution="1280 720">
                    <parent link="head"/>
                    <origin xyz="0 0 0.1"/>
                </mujoco_camera>
            </robot>
        "#;
        let robot = parse_urdf_str(xml).expect("should parse");
        let camera = &robot.link("head").expect("head").cameras[0];
        assert_eq!(camera.name, "tracking");
        assert_relative_eq!(camera.hfov, 45.0);
        assert_relative_eq!(camera.width, 1280.0);
        assert_relative_eq!(camera.height, 720.0);
        assert_relative_eq!(camera.clip_near, 0.01);
        assert_relative_eq!(camera.clip_far, 1000.0);
        assert_relative_eq!(camera.update_rate, 30.0);
        // The pose is flipped half a turn about the Y axis.
        assert_relative_eq!(camera.origin.rotation.angle(), std::f64::consts::PI, epsilon = 1e-10);
        let axis = camera.origin.rotation.axis().expect("rotation axis");
        assert_relative_eq!(axis.y.abs(), 1.0, epsilon = 1e-10);
    }

    #[test]
    fn test_joint_reference_to_unknown_link_rejected() {
        let xml = r#"
            <robot name="r">
                <link name="base"/>
                <joint name="j" type="fixed">
                    <parent link="base"/>
                    <child link="ghost"/>
                </joint>
            </robot>
        "#;
        let result = parse_urdf_str(xml);
        assert!(
            matches!(result, Err(UrdfError::UndefinedLink { link_name, .. }) if link_name == "ghost")
        );
    }

    #[test]
    fn test_duplicate_child_link_rejected() {
        let xml = r#"
            <robot name="r">
                <link name="base"/>
                <link name="aux"/>
                <link name="wrist"/>
                <joint name="j1" type="fixed">
                    <parent link="base"/>
                    <child link="wrist"/>
                </joint>
                <joint name="j2" type="fixed">
                    <parent link="aux"/>
                    <child link="wrist"/>
                </joint>
            </robot>
        "#;
        let result = parse_urdf_str(xml);
        assert!(
            matches!(result, Err(UrdfError::DuplicateChildLink { link_name, .. }) if link_name == "wrist")
        );
    }

    #[test]
    fn test_joint_linkage_pass() {
        let xml = r#"
            <robot name="r">
                <link name="base"/>
                <link name="a"/>
                <link name="b"/>
                <link name="c"/>
                <joint name="j1" type="fixed">
                    <parent link="base"/>
                    <child link="a"/>
                </joint>
                <joint name="j2" type="fixed">
                    <parent link="a"/>
                    <child link="b"/>
                </joint>
                <joint name="j3" type="fixed">
                    <parent link="a"/>
                    <child link="c"/>
                </joint>
            </robot>
        "#;
        let robot = parse_urdf_str(xml).expect("should parse");
        assert_eq!(robot.joint("j1").expect("j1").parent_joint, None);
        assert_eq!(
            robot.joint("j2").expect("j2").parent_joint.as_deref(),
            Some("j1")
        );
        assert_eq!(
            robot.joint("j1").expect("j1").children_joints,
            vec!["j2".to_string(), "j3".to_string()]
        );
        assert!(robot.joint("j3").expect("j3").children_joints.is_empty());
    }

    #[test]
    fn test_empty_document() {
        assert!(matches!(parse_urdf_str(""), Err(UrdfError::EmptyDocument)));
        assert!(matches!(
            parse_urdf_str("<scene/>"),
            Err(UrdfError::EmptyDocument)
        ));
        assert!(matches!(
            parse_urdf_str(r#"<robot name="r"/>"#),
            Err(UrdfError::NoRootLink)
        ));
    }

    #[test]
    fn test_unknown_elements_skipped() {
        let xml = r#"
            <robot name="r">
                <gazebo reference="base">
                    <material>Gazebo/Blue</material>
                    <limit lower="-99" upper="99" effort="99" velocity="99"/>
                </gazebo>
                <link name="base"/>
                <transmission name="t1"><actuator name="m1"/></transmission>
            </robot>
        "#;
        let robot = parse_urdf_str(xml).expect("should parse");
        assert_eq!(robot.links.len(), 1);
        assert!(robot.materials.is_empty());
    }

    #[test]
    fn test_parse_vector3() {
        let v = parse_vector3("1.0 2.0 3.0").expect("should parse");
        assert_relative_eq!(v.x, 1.0, epsilon = 1e-10);
        assert_relative_eq!(v.y, 2.0, epsilon = 1e-10);
        assert_relative_eq!(v.z, 3.0, epsilon = 1e-10);

        // With extra whitespace
        let v = parse_vector3("  1   2   3  ").expect("should parse");
        assert_relative_eq!(v.x, 1.0, epsilon = 1e-10);

        assert!(parse_vector3("1 2").is_err());
        assert!(parse_vector3("a b c").is_err());
    }

    #[test]
    fn test_parse_float_pair() {
        assert_eq!(parse_float_pair("640 480"), Some((640.0, 480.0)));
        assert_eq!(parse_float_pair("1.5   2.5"), Some((1.5, 2.5)));
        assert_eq!(parse_float_pair("640"), None);
        assert_eq!(parse_float_pair("1 2 3"), None);
        assert_eq!(parse_float_pair("a b"), None);
    }

    #[test]
    fn test_parse_urdf_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bot.urdf");
        std::fs::write(
            &path,
            r#"<robot name="bot"><link name="base"/></robot>"#,
        )
        .unwrap();

        let robot = parse_urdf_file(&path).expect("should parse");
        assert_eq!(robot.name, "bot");

        assert!(parse_urdf_file(dir.path().join("missing.urdf")).is_err());
    }
}
