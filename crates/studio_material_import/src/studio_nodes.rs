// SPDX-License-Identifier: MIT OR Apache-2.0
//! Studio node vocabulary.
//!
//! Socket layouts follow the current target schema. Sockets renamed between
//! schema revisions are reached through the alias tables registered at the
//! end of [`create_studio_registry`].

use crate::lookups::{CUSTOM_NODE_GROUPS, PASSTHROUGHS, POSITIONAL_FALLBACKS};
use crate::registry::{
    MixMode, NodeKind, NodeTypeRegistry, PropertySpec, GROUP_INPUT_TYPE, GROUP_OUTPUT_TYPE, GROUP_TYPE,
    MATERIAL_OUTPUT_TYPE,
};
use studio_material_graph::{NodeCategory, NodeType, Socket, SocketDirection, SocketType, SocketValue};

const MATH_OPERATIONS: &[&str] = &[
    "ADD", "SUBTRACT", "MULTIPLY", "DIVIDE", "MULTIPLY_ADD", "POWER", "LOGARITHM", "SQRT", "INVERSE_SQRT",
    "ABSOLUTE", "EXPONENT", "MINIMUM", "MAXIMUM", "LESS_THAN", "GREATER_THAN", "SIGN", "COMPARE",
    "SMOOTH_MIN", "SMOOTH_MAX", "ROUND", "FLOOR", "CEIL", "TRUNC", "FRACT", "MODULO", "FLOORED_MODULO",
    "WRAP", "SNAP", "PINGPONG", "SINE", "COSINE", "TANGENT", "ARCSINE", "ARCCOSINE", "ARCTANGENT",
    "ARCTAN2", "SINH", "COSH", "TANH", "RADIANS", "DEGREES",
];

const VECTOR_MATH_OPERATIONS: &[&str] = &[
    "ADD", "SUBTRACT", "MULTIPLY", "DIVIDE", "MULTIPLY_ADD", "CROSS_PRODUCT", "PROJECT", "REFLECT",
    "REFRACT", "FACEFORWARD", "DOT_PRODUCT", "DISTANCE", "LENGTH", "SCALE", "NORMALIZE", "ABSOLUTE",
    "POWER", "SIGN", "MINIMUM", "MAXIMUM", "FLOOR", "CEIL", "FRACTION", "MODULO", "WRAP", "SNAP", "SINE",
    "COSINE", "TANGENT",
];

const BLEND_TYPES: &[&str] = &[
    "MIX", "DARKEN", "MULTIPLY", "BURN", "LIGHTEN", "SCREEN", "DODGE", "ADD", "OVERLAY", "SOFT_LIGHT",
    "LINEAR_LIGHT", "DIFFERENCE", "EXCLUSION", "SUBTRACT", "DIVIDE", "HUE", "SATURATION", "COLOR", "VALUE",
];

const TRANSFORM_SPACES: &[&str] = &["WORLD", "OBJECT", "CAMERA"];

const MATH_OPERATION: PropertySpec = PropertySpec {
    attribute: "operation",
    property: "operation",
    values: MATH_OPERATIONS,
    default: "ADD",
};

const VECTOR_MATH_OPERATION: PropertySpec = PropertySpec {
    attribute: "operation",
    property: "operation",
    values: VECTOR_MATH_OPERATIONS,
    default: "ADD",
};

const BLEND_TYPE: PropertySpec = PropertySpec {
    attribute: "blend_type",
    property: "blend_type",
    values: BLEND_TYPES,
    default: "MIX",
};

fn float_in(name: &str, value: f32) -> Socket {
    Socket::input(name, SocketType::Float).with_default(SocketValue::Float(value))
}

fn color_in(name: &str, value: [f32; 4]) -> Socket {
    Socket::input(name, SocketType::Color).with_default(SocketValue::Color(value))
}

fn vector_in(name: &str, value: [f32; 3]) -> Socket {
    Socket::input(name, SocketType::Vector).with_default(SocketValue::Vector(value))
}

fn shader_in(name: &str) -> Socket {
    Socket::input(name, SocketType::Shader)
}

fn float_out(name: &str) -> Socket {
    Socket::output(name, SocketType::Float)
}

fn color_out(name: &str) -> Socket {
    Socket::output(name, SocketType::Color)
}

fn vector_out(name: &str) -> Socket {
    Socket::output(name, SocketType::Vector)
}

fn shader_out(name: &str) -> Socket {
    Socket::output(name, SocketType::Shader)
}

const GREY: [f32; 4] = [0.8, 0.8, 0.8, 1.0];
const MID_GREY: [f32; 4] = [0.5, 0.5, 0.5, 1.0];
const WHITE: [f32; 4] = [1.0, 1.0, 1.0, 1.0];
const ZERO: [f32; 3] = [0.0, 0.0, 0.0];

/// Create the registry for Studio material documents
pub fn create_studio_registry() -> NodeTypeRegistry {
    let material_output = NodeType::new(MATERIAL_OUTPUT_TYPE, "Material Output", NodeCategory::Output).with_inputs(vec![
        shader_in("Surface"),
        shader_in("Volume"),
        vector_in("Displacement", ZERO),
        float_in("Thickness", 0.0),
    ]);
    let mut registry = NodeTypeRegistry::new(material_output);

    // ========================================================================
    // Constants and inputs
    // ========================================================================

    let value = NodeType::new("ShaderNodeValue", "Value", NodeCategory::Input)
        .with_outputs(vec![float_out("Value").with_default(SocketValue::Float(0.5))]);
    registry.register("value", NodeKind::Value, value, Vec::new());

    let rgb = NodeType::new("ShaderNodeRGB", "RGB", NodeCategory::Input)
        .with_outputs(vec![color_out("Color").with_default(SocketValue::Color(MID_GREY))]);
    registry.register("color", NodeKind::Rgb { vector: false }, rgb.clone(), Vec::new());
    registry.register("vector", NodeKind::Rgb { vector: true }, rgb, Vec::new());

    registry.register(
        "texture_coordinate",
        NodeKind::Plain,
        NodeType::new("ShaderNodeTexCoord", "Texture Coordinate", NodeCategory::Input).with_outputs(vec![
            vector_out("Generated"),
            vector_out("Normal"),
            vector_out("UV"),
            vector_out("Object"),
            vector_out("Camera"),
            vector_out("Window"),
            vector_out("Reflection"),
        ]),
        Vec::new(),
    );

    registry.register(
        "object_info",
        NodeKind::Plain,
        NodeType::new("ShaderNodeObjectInfo", "Object Info", NodeCategory::Input).with_outputs(vec![
            vector_out("Location"),
            color_out("Color"),
            float_out("Alpha"),
            float_out("Object Index"),
            float_out("Material Index"),
            float_out("Random"),
        ]),
        Vec::new(),
    );

    registry.register(
        "uvmap",
        NodeKind::Plain,
        NodeType::new("ShaderNodeUVMap", "UV Map", NodeCategory::Input).with_outputs(vec![vector_out("UV")]),
        vec![PropertySpec {
            attribute: "uv_map",
            property: "uv_map",
            values: &[],
            default: "",
        }],
    );

    registry.register(
        "geometry",
        NodeKind::Plain,
        NodeType::new("ShaderNodeNewGeometry", "Geometry", NodeCategory::Input).with_outputs(vec![
            vector_out("Position"),
            vector_out("Normal"),
            vector_out("Tangent"),
            vector_out("True Normal"),
            vector_out("Incoming"),
            vector_out("Parametric"),
            float_out("Backfacing"),
            float_out("Pointiness"),
            float_out("Random Per Island"),
        ]),
        Vec::new(),
    );

    registry.register(
        "layer_weight",
        NodeKind::Plain,
        NodeType::new("ShaderNodeLayerWeight", "Layer Weight", NodeCategory::Input)
            .with_inputs(vec![float_in("Blend", 0.5), vector_in("Normal", ZERO)])
            .with_outputs(vec![float_out("Fresnel"), float_out("Facing")]),
        Vec::new(),
    );

    // ========================================================================
    // Shaders
    // ========================================================================

    registry.register(
        "principled_bsdf",
        NodeKind::Plain,
        NodeType::new("ShaderNodeBsdfPrincipled", "Principled BSDF", NodeCategory::Shader)
            .with_width(240.0)
            .with_inputs(vec![
                color_in("Base Color", GREY),
                float_in("Metallic", 0.0),
                float_in("Roughness", 0.5),
                float_in("IOR", 1.5),
                float_in("Alpha", 1.0),
                vector_in("Normal", ZERO),
                float_in("Weight", 0.0).disabled(),
                float_in("Subsurface Weight", 0.0),
                vector_in("Subsurface Radius", [1.0, 0.2, 0.1]),
                float_in("Subsurface Scale", 0.05),
                float_in("Subsurface IOR", 1.4),
                float_in("Subsurface Anisotropy", 0.0),
                float_in("Specular IOR Level", 0.5),
                color_in("Specular Tint", WHITE),
                float_in("Anisotropic", 0.0),
                float_in("Anisotropic Rotation", 0.0),
                vector_in("Tangent", ZERO),
                float_in("Transmission Weight", 0.0),
                float_in("Coat Weight", 0.0),
                float_in("Coat Roughness", 0.03),
                float_in("Coat IOR", 1.5),
                color_in("Coat Tint", WHITE),
                vector_in("Coat Normal", ZERO),
                float_in("Sheen Weight", 0.0),
                float_in("Sheen Roughness", 0.5),
                color_in("Sheen Tint", WHITE),
                color_in("Emission Color", WHITE),
                float_in("Emission Strength", 0.0),
                float_in("Thin Film Thickness", 0.0),
                float_in("Thin Film IOR", 1.33),
            ])
            .with_outputs(vec![shader_out("BSDF")]),
        Vec::new(),
    );

    registry.register(
        "translucent_bsdf",
        NodeKind::Plain,
        NodeType::new("ShaderNodeBsdfTranslucent", "Translucent BSDF", NodeCategory::Shader)
            .with_inputs(vec![
                color_in("Color", GREY),
                vector_in("Normal", ZERO),
                float_in("Weight", 0.0).disabled(),
            ])
            .with_outputs(vec![shader_out("BSDF")]),
        Vec::new(),
    );

    registry.register(
        "transparent_bsdf",
        NodeKind::Plain,
        NodeType::new("ShaderNodeBsdfTransparent", "Transparent BSDF", NodeCategory::Shader)
            .with_inputs(vec![color_in("Color", WHITE), float_in("Weight", 0.0).disabled()])
            .with_outputs(vec![shader_out("BSDF")]),
        Vec::new(),
    );

    registry.register(
        "glossy_bsdf",
        NodeKind::Plain,
        NodeType::new("ShaderNodeBsdfAnisotropic", "Glossy BSDF", NodeCategory::Shader)
            .with_width(150.0)
            .with_inputs(vec![
                color_in("Color", GREY),
                float_in("Roughness", 0.5),
                float_in("Anisotropy", 0.0),
                float_in("Rotation", 0.0),
                vector_in("Normal", ZERO),
                vector_in("Tangent", ZERO),
                float_in("Weight", 0.0).disabled(),
            ])
            .with_outputs(vec![shader_out("BSDF")]),
        vec![PropertySpec {
            attribute: "distribution",
            property: "distribution",
            values: &["BECKMANN", "GGX", "ASHIKHMIN_SHIRLEY", "MULTI_GGX"],
            default: "MULTI_GGX",
        }],
    );

    registry.register(
        "diffuse_bsdf",
        NodeKind::Plain,
        NodeType::new("ShaderNodeBsdfDiffuse", "Diffuse BSDF", NodeCategory::Shader)
            .with_inputs(vec![
                color_in("Color", GREY),
                float_in("Roughness", 0.0),
                vector_in("Normal", ZERO),
                float_in("Weight", 0.0).disabled(),
            ])
            .with_outputs(vec![shader_out("BSDF")]),
        Vec::new(),
    );

    registry.register(
        "emission",
        NodeKind::Plain,
        NodeType::new("ShaderNodeEmission", "Emission", NodeCategory::Shader)
            .with_inputs(vec![
                color_in("Color", WHITE),
                float_in("Strength", 1.0),
                float_in("Weight", 0.0).disabled(),
            ])
            .with_outputs(vec![shader_out("Emission")]),
        Vec::new(),
    );

    registry.register(
        "absorption_volume",
        NodeKind::Plain,
        NodeType::new("ShaderNodeVolumeAbsorption", "Volume Absorption", NodeCategory::Shader)
            .with_inputs(vec![
                color_in("Color", GREY),
                float_in("Density", 1.0),
                float_in("Weight", 0.0).disabled(),
            ])
            .with_outputs(vec![shader_out("Volume")]),
        Vec::new(),
    );

    registry.register(
        "add_closure",
        NodeKind::Plain,
        NodeType::new("ShaderNodeAddShader", "Add Shader", NodeCategory::Shader)
            .with_inputs(vec![shader_in("Shader"), shader_in("Shader")])
            .with_outputs(vec![shader_out("Shader")]),
        Vec::new(),
    );

    let mix_shader = NodeType::new("ShaderNodeMixShader", "Mix Shader", NodeCategory::Shader)
        .with_inputs(vec![float_in("Fac", 0.5), shader_in("Shader"), shader_in("Shader")])
        .with_outputs(vec![shader_out("Shader")]);
    registry.register("mix_closure", NodeKind::Plain, mix_shader.clone(), Vec::new());
    registry.register("switch_closure", NodeKind::Plain, mix_shader, Vec::new());

    // ========================================================================
    // Textures
    // ========================================================================

    registry.register(
        "noise_texture",
        NodeKind::Plain,
        NodeType::new("ShaderNodeTexNoise", "Noise Texture", NodeCategory::Texture)
            .with_inputs(vec![
                vector_in("Vector", ZERO),
                float_in("W", 0.0).disabled(),
                float_in("Scale", 5.0),
                float_in("Detail", 2.0),
                float_in("Roughness", 0.5),
                float_in("Lacunarity", 2.0),
                float_in("Offset", 0.0).disabled(),
                float_in("Gain", 1.0).disabled(),
                float_in("Distortion", 0.0),
            ])
            .with_outputs(vec![float_out("Fac"), color_out("Color")]),
        vec![PropertySpec {
            attribute: "dimensions",
            property: "noise_dimensions",
            values: &["1D", "2D", "3D", "4D"],
            default: "3D",
        }],
    );

    registry.register(
        "image_texture",
        NodeKind::ImageTexture,
        NodeType::new("ShaderNodeTexImage", "Image Texture", NodeCategory::Texture)
            .with_width(240.0)
            .with_inputs(vec![vector_in("Vector", ZERO)])
            .with_outputs(vec![color_out("Color"), float_out("Alpha")]),
        vec![
            PropertySpec {
                attribute: "interpolation",
                property: "interpolation",
                values: &["LINEAR", "CLOSEST", "CUBIC", "SMART"],
                default: "LINEAR",
            },
            PropertySpec {
                attribute: "projection",
                property: "projection",
                values: &["FLAT", "BOX", "SPHERE", "TUBE"],
                default: "FLAT",
            },
            PropertySpec {
                attribute: "extension",
                property: "extension",
                values: &["REPEAT", "EXTEND", "CLIP", "MIRROR"],
                default: "REPEAT",
            },
        ],
    );

    registry.register(
        "voronoi_texture",
        NodeKind::Plain,
        NodeType::new("ShaderNodeTexVoronoi", "Voronoi Texture", NodeCategory::Texture)
            .with_inputs(vec![
                vector_in("Vector", ZERO),
                float_in("W", 0.0).disabled(),
                float_in("Scale", 5.0),
                float_in("Detail", 0.0),
                float_in("Roughness", 0.5),
                float_in("Lacunarity", 2.0),
                float_in("Smoothness", 1.0).disabled(),
                float_in("Exponent", 0.5).disabled(),
                float_in("Randomness", 1.0),
            ])
            .with_outputs(vec![
                float_out("Distance"),
                color_out("Color"),
                vector_out("Position"),
                float_out("W").disabled(),
                float_out("Radius").disabled(),
            ]),
        vec![
            PropertySpec {
                attribute: "feature",
                property: "feature",
                values: &["F1", "F2", "SMOOTH_F1", "DISTANCE_TO_EDGE", "N_SPHERE_RADIUS"],
                default: "F1",
            },
            PropertySpec {
                attribute: "distance",
                property: "distance",
                values: &["EUCLIDEAN", "MANHATTAN", "CHEBYCHEV", "MINKOWSKI"],
                default: "EUCLIDEAN",
            },
        ],
    );

    // ========================================================================
    // Color
    // ========================================================================

    let mix = NodeType::new("ShaderNodeMix", "Mix", NodeCategory::Color)
        .with_inputs(vec![
            float_in("Factor", 0.5),
            vector_in("Factor", [0.5, 0.5, 0.5]),
            float_in("A", 0.0),
            float_in("B", 0.0),
            vector_in("A", ZERO),
            vector_in("B", ZERO),
            color_in("A", MID_GREY),
            color_in("B", MID_GREY),
        ])
        .with_outputs(vec![float_out("Result"), vector_out("Result"), color_out("Result")]);
    registry.register("mix", NodeKind::Mix(MixMode::Rgba), mix.clone(), vec![BLEND_TYPE]);
    registry.register("mix_value", NodeKind::Mix(MixMode::Float), mix.clone(), vec![BLEND_TYPE]);
    registry.register("switch_float", NodeKind::Mix(MixMode::Float), mix, vec![BLEND_TYPE]);

    registry.register(
        "brightness_contrast",
        NodeKind::Plain,
        NodeType::new("ShaderNodeBrightContrast", "Brightness/Contrast", NodeCategory::Color)
            .with_inputs(vec![color_in("Color", WHITE), float_in("Bright", 0.0), float_in("Contrast", 0.0)])
            .with_outputs(vec![color_out("Color")]),
        Vec::new(),
    );

    registry.register(
        "rgb_curves",
        NodeKind::Plain,
        NodeType::new("ShaderNodeRGBCurve", "RGB Curves", NodeCategory::Color)
            .with_width(240.0)
            .with_inputs(vec![float_in("Fac", 1.0), color_in("Color", WHITE)])
            .with_outputs(vec![color_out("Color")]),
        Vec::new(),
    );

    // ========================================================================
    // Vector
    // ========================================================================

    registry.register(
        "vector_transform",
        NodeKind::Plain,
        NodeType::new("ShaderNodeVectorTransform", "Vector Transform", NodeCategory::Vector)
            .with_inputs(vec![vector_in("Vector", [0.5, 0.5, 0.5])])
            .with_outputs(vec![vector_out("Vector")]),
        vec![
            PropertySpec {
                attribute: "convert_from",
                property: "convert_from",
                values: TRANSFORM_SPACES,
                default: "WORLD",
            },
            PropertySpec {
                attribute: "convert_to",
                property: "convert_to",
                values: TRANSFORM_SPACES,
                default: "OBJECT",
            },
            PropertySpec {
                attribute: "type",
                property: "vector_type",
                values: &["POINT", "VECTOR", "NORMAL"],
                default: "VECTOR",
            },
        ],
    );

    registry.register(
        "bump",
        NodeKind::Plain,
        NodeType::new("ShaderNodeBump", "Bump", NodeCategory::Vector)
            .with_inputs(vec![
                float_in("Strength", 1.0),
                float_in("Distance", 1.0),
                float_in("Height", 1.0),
                vector_in("Normal", ZERO),
            ])
            .with_outputs(vec![vector_out("Normal")]),
        Vec::new(),
    );

    registry.register(
        "rounding_edge_normal",
        NodeKind::Plain,
        NodeType::new("ShaderNodeBevel", "Bevel", NodeCategory::Vector)
            .with_inputs(vec![float_in("Radius", 0.05), vector_in("Normal", ZERO)])
            .with_outputs(vec![vector_out("Normal")]),
        Vec::new(),
    );

    registry.register(
        "mapping",
        NodeKind::Plain,
        NodeType::new("ShaderNodeMapping", "Mapping", NodeCategory::Vector)
            .with_inputs(vec![
                vector_in("Vector", ZERO),
                vector_in("Location", ZERO),
                vector_in("Rotation", ZERO),
                vector_in("Scale", [1.0, 1.0, 1.0]),
            ])
            .with_outputs(vec![vector_out("Vector")]),
        vec![PropertySpec {
            attribute: "type",
            property: "vector_type",
            values: &["POINT", "TEXTURE", "VECTOR", "NORMAL"],
            default: "POINT",
        }],
    );

    registry.register(
        "normal_map",
        NodeKind::Plain,
        NodeType::new("ShaderNodeNormalMap", "Normal Map", NodeCategory::Vector)
            .with_width(150.0)
            .with_inputs(vec![float_in("Strength", 1.0), color_in("Color", [0.5, 0.5, 1.0, 1.0])])
            .with_outputs(vec![vector_out("Normal")]),
        vec![PropertySpec {
            attribute: "space",
            property: "space",
            values: &["TANGENT", "OBJECT", "WORLD", "BLENDER_OBJECT", "BLENDER_WORLD"],
            default: "TANGENT",
        }],
    );

    // ========================================================================
    // Converters
    // ========================================================================

    registry.register(
        "math",
        NodeKind::Plain,
        NodeType::new("ShaderNodeMath", "Math", NodeCategory::Converter)
            .with_inputs(vec![float_in("Value", 0.5), float_in("Value", 0.5), float_in("Value", 0.5)])
            .with_outputs(vec![float_out("Value")]),
        vec![MATH_OPERATION],
    );

    registry.register(
        "vector_math",
        NodeKind::Plain,
        NodeType::new("ShaderNodeVectorMath", "Vector Math", NodeCategory::Converter)
            .with_inputs(vec![
                vector_in("Vector", ZERO),
                vector_in("Vector", ZERO),
                vector_in("Vector", ZERO).disabled(),
                float_in("Scale", 1.0).disabled(),
            ])
            .with_outputs(vec![vector_out("Vector"), float_out("Value").disabled()]),
        vec![VECTOR_MATH_OPERATION],
    );

    registry.register(
        "map_range",
        NodeKind::Plain,
        NodeType::new("ShaderNodeMapRange", "Map Range", NodeCategory::Converter)
            .with_inputs(vec![
                float_in("Value", 1.0),
                float_in("From Min", 0.0),
                float_in("From Max", 1.0),
                float_in("To Min", 0.0),
                float_in("To Max", 1.0),
                float_in("Steps", 4.0).disabled(),
                vector_in("Vector", ZERO).disabled(),
            ])
            .with_outputs(vec![float_out("Result"), vector_out("Vector").disabled()]),
        vec![PropertySpec {
            attribute: "interpolation",
            property: "interpolation_type",
            values: &["LINEAR", "STEPPED", "SMOOTHSTEP", "SMOOTHERSTEP"],
            default: "LINEAR",
        }],
    );

    registry.register(
        "rgb_ramp",
        NodeKind::Plain,
        NodeType::new("ShaderNodeValToRGB", "Color Ramp", NodeCategory::Converter)
            .with_width(240.0)
            .with_inputs(vec![float_in("Fac", 0.5)])
            .with_outputs(vec![color_out("Color"), float_out("Alpha")]),
        Vec::new(),
    );

    registry.register(
        "separate_xyz",
        NodeKind::Plain,
        NodeType::new("ShaderNodeSeparateXYZ", "Separate XYZ", NodeCategory::Converter)
            .with_inputs(vec![vector_in("Vector", ZERO)])
            .with_outputs(vec![float_out("X"), float_out("Y"), float_out("Z")]),
        Vec::new(),
    );

    registry.register(
        "combine_xyz",
        NodeKind::Plain,
        NodeType::new("ShaderNodeCombineXYZ", "Combine XYZ", NodeCategory::Converter)
            .with_inputs(vec![float_in("X", 0.0), float_in("Y", 0.0), float_in("Z", 0.0)])
            .with_outputs(vec![vector_out("Vector")]),
        Vec::new(),
    );

    // ========================================================================
    // Groups
    // ========================================================================

    registry.register(
        "group_input",
        NodeKind::GroupInput,
        NodeType::new(GROUP_INPUT_TYPE, "Group Input", NodeCategory::Group),
        Vec::new(),
    );
    registry.register(
        "group_output",
        NodeKind::GroupOutput,
        NodeType::new(GROUP_OUTPUT_TYPE, "Group Output", NodeCategory::Group),
        Vec::new(),
    );
    registry.register(
        "group",
        NodeKind::Group,
        NodeType::new(GROUP_TYPE, "Group", NodeCategory::Group),
        Vec::new(),
    );
    for (tag, subgraph) in CUSTOM_NODE_GROUPS {
        registry.register(
            tag,
            NodeKind::CustomGroup {
                subgraph: subgraph.to_string(),
            },
            NodeType::new(GROUP_TYPE, *subgraph, NodeCategory::Group),
            Vec::new(),
        );
    }

    // ========================================================================
    // Alias tables
    // ========================================================================

    use SocketDirection::{Input, Output};

    registry.alias("ShaderNodeBevel", Input, "Size", "Radius");
    registry.alias("ShaderNodeMath", Input, "Value1", 0);
    registry.alias("ShaderNodeMath", Input, "Value2", 1);
    registry.alias("ShaderNodeVectorMath", Input, "Vector1", 0);
    registry.alias("ShaderNodeVectorMath", Input, "Vector2", 1);
    registry.alias("ShaderNodeAddShader", Input, "Shader1", 0);
    registry.alias("ShaderNodeAddShader", Input, "Shader2", 1);
    registry.alias("ShaderNodeMixShader", Input, "Shader1", 1);
    registry.alias("ShaderNodeMixShader", Input, "Shader2", 2);

    for (name, index) in [
        ("Fac", 0),
        // <switch_float>
        ("ValueDisable", 2),
        ("ValueEnable", 3),
        // <mix_value>
        ("Value1", 2),
        ("Value2", 3),
        // <mix>
        ("Color1", 6),
        ("Color2", 7),
    ] {
        registry.alias("ShaderNodeMix", Input, name, index);
    }
    for name in ["Value", "ValueOut", "Color"] {
        registry.alias("ShaderNodeMix", Output, name, "Result");
    }

    for (name, target) in [
        ("Subsurface", "Subsurface Weight"),
        ("Clearcoat", "Coat Weight"),
        ("ClearcoatRoughness", "Coat Roughness"),
        ("Clearcoat Roughness", "Coat Roughness"),
        ("ClearcoatNormal", "Coat Normal"),
        ("Clearcoat Normal", "Coat Normal"),
        ("Transmission", "Transmission Weight"),
        ("Sheen", "Sheen Weight"),
        ("SheenTint", "Sheen Tint"),
        ("Specular", "Specular IOR Level"),
        ("SpecularTint", "Specular Tint"),
        ("AnisotropicRotation", "Anisotropic Rotation"),
        ("SubsurfaceRadius", "Subsurface Radius"),
        ("TransmissionRoughness", "Roughness"),
        ("Transmission Roughness", "Roughness"),
        ("SubsurfaceColor", "Subsurface Radius"),
        ("BaseColor", "Base Color"),
        ("Color", "Base Color"),
        ("Emission", "Emission Color"),
    ] {
        registry.alias("ShaderNodeBsdfPrincipled", Input, name, target);
    }

    registry.alias("ShaderNodeMapRange", Output, "Value", "Result");
    registry.alias("ShaderNodeTexVoronoi", Output, "Fac", "Distance");

    for (name, index) in POSITIONAL_FALLBACKS {
        registry.positional(name, *index);
    }
    for (name, socket_type) in PASSTHROUGHS {
        registry.passthrough(name, *socket_type);
    }

    registry
}
