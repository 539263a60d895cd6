//! Landmark index scheme (468-point face mesh, 478 with iris refinement).
//!
//! "Right" and "left" follow the mesh convention: the subject's right eye
//! contains corner 33 and appears on the image's left side.

/// Points in the base mesh. Fewer than this cannot be scored for eye contact.
pub const FACE_MESH_POINTS: usize = 468;

/// Points in the mesh with both iris rings appended.
pub const FACE_MESH_WITH_IRIS_POINTS: usize = 478;

/// Six-point EAR subsets: outer corner, two upper lid points, inner corner,
/// two lower lid points (p1..p6).
pub const RIGHT_EYE_EAR: [usize; 6] = [33, 160, 158, 133, 153, 144];
pub const LEFT_EYE_EAR: [usize; 6] = [362, 385, 387, 263, 373, 380];

/// Full 16-point eye contours, used for the eye centroid.
pub const RIGHT_EYE_CONTOUR: [usize; 16] = [
    33, 7, 163, 144, 145, 153, 154, 155, 133, 173, 157, 158, 159, 160, 161, 246,
];
pub const LEFT_EYE_CONTOUR: [usize; 16] = [
    362, 382, 381, 380, 374, 373, 390, 249, 263, 466, 388, 387, 386, 385, 384, 398,
];

/// Iris rings (center first), only present in iris-refined frames.
pub const RIGHT_IRIS: [usize; 5] = [468, 469, 470, 471, 472];
pub const LEFT_IRIS: [usize; 5] = [473, 474, 475, 476, 477];

pub const NOSE_TIP: usize = 4;

/// Outer eye corners, used for the head-centering proxy and symmetry.
pub const RIGHT_EYE_OUTER: usize = 33;
pub const LEFT_EYE_OUTER: usize = 263;

/// Face edges at ear height, used for apparent head width.
pub const RIGHT_FACE_EDGE: usize = 234;
pub const LEFT_FACE_EDGE: usize = 454;

pub const RIGHT_MOUTH_CORNER: usize = 61;
pub const LEFT_MOUTH_CORNER: usize = 291;

/// Inner-lip corners (mouth width for MAR).
pub const RIGHT_INNER_LIP_CORNER: usize = 78;
pub const LEFT_INNER_LIP_CORNER: usize = 308;

/// Upper/lower inner-lip pairs (mouth opening for MAR).
pub const INNER_LIP_PAIRS: [(usize, usize); 3] = [(13, 14), (82, 87), (312, 317)];
