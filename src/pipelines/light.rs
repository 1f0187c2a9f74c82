use anyhow::bail;
use bytemuck::Zeroable;
use wgpu::util::DeviceExt;

/// Size of the point light array in the shader.
pub const MAX_POINT_LIGHTS: usize = 5;

/// A static point light. Colours are linear RGB.
#[derive(Clone, Debug, PartialEq)]
pub struct PointLight {
    pub position: [f32; 3],
    pub ambient: [f32; 3],
    pub diffuse: [f32; 3],
    pub specular: [f32; 3],
    pub active: bool,
}

impl PointLight {
    /// An active light with grey ambient, diffuse and specular intensities.
    pub fn new(position: [f32; 3], ambient: f32, diffuse: f32, specular: f32) -> Self {
        Self {
            position,
            ambient: [ambient; 3],
            diffuse: [diffuse; 3],
            specular: [specular; 3],
            active: true,
        }
    }
}

#[repr(C)]
#[derive(Debug, Copy, Clone, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct PointLightRaw {
    position: [f32; 3],
    // shares the 16 byte row with the position
    active: u32,
    ambient: [f32; 3],
    _padding: u32,
    diffuse: [f32; 3],
    _padding2: u32,
    specular: [f32; 3],
    _padding3: u32,
}

impl From<&PointLight> for PointLightRaw {
    fn from(light: &PointLight) -> Self {
        Self {
            position: light.position,
            active: light.active as u32,
            ambient: light.ambient,
            _padding: 0,
            diffuse: light.diffuse,
            _padding2: 0,
            specular: light.specular,
            _padding3: 0,
        }
    }
}

#[repr(C)]
#[derive(Debug, Copy, Clone, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct LightUniform {
    point_lights: [PointLightRaw; MAX_POINT_LIGHTS],
    use_lighting: u32,
    // Due to uniforms requiring 16 byte (4 float) spacing, we need to use a padding field here
    _padding: [u32; 3],
}

impl LightUniform {
    /// Pack `lights` into the fixed shader array. Unused entries stay inactive.
    pub fn new(lights: &[PointLight], use_lighting: bool) -> anyhow::Result<Self> {
        if lights.len() > MAX_POINT_LIGHTS {
            bail!(
                "{} point lights configured but the shader supports at most {}",
                lights.len(),
                MAX_POINT_LIGHTS
            );
        }
        let mut point_lights = [PointLightRaw::zeroed(); MAX_POINT_LIGHTS];
        for (raw, light) in point_lights.iter_mut().zip(lights) {
            *raw = light.into();
        }
        Ok(Self {
            point_lights,
            use_lighting: use_lighting as u32,
            _padding: [0; 3],
        })
    }

    pub fn use_lighting(&self) -> bool {
        self.use_lighting != 0
    }

    pub fn active_lights(&self) -> usize {
        self.point_lights
            .iter()
            .filter(|light| light.active != 0)
            .count()
    }
}

pub struct LightResources {
    pub uniform: LightUniform,
    pub buffer: wgpu::Buffer,
    pub bind_group: wgpu::BindGroup,
    pub bind_group_layout: wgpu::BindGroupLayout,
}

impl LightResources {
    pub fn new(device: &wgpu::Device, uniform: LightUniform) -> Self {
        let buffer = mk_buffer(device, uniform);
        let bind_group_layout = mk_bind_group_layout(device);
        let bind_group = mk_bind_group(device, &bind_group_layout, &buffer);
        Self {
            uniform,
            buffer,
            bind_group,
            bind_group_layout,
        }
    }
}

pub fn mk_buffer(device: &wgpu::Device, light_uniform: LightUniform) -> wgpu::Buffer {
    device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
        label: Some("Light Uniform Buffer"),
        contents: bytemuck::cast_slice(&[light_uniform]),
        usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
    })
}

pub fn mk_bind_group_layout(device: &wgpu::Device) -> wgpu::BindGroupLayout {
    device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
        entries: &[wgpu::BindGroupLayoutEntry {
            binding: 0,
            visibility: wgpu::ShaderStages::FRAGMENT,
            ty: wgpu::BindingType::Buffer {
                ty: wgpu::BufferBindingType::Uniform,
                has_dynamic_offset: false,
                min_binding_size: None,
            },
            count: None,
        }],
        label: Some("light_bind_group_layout"),
    })
}

pub fn mk_bind_group(
    device: &wgpu::Device,
    bind_group_layout: &wgpu::BindGroupLayout,
    light_buffer: &wgpu::Buffer,
) -> wgpu::BindGroup {
    device.create_bind_group(&wgpu::BindGroupDescriptor {
        layout: bind_group_layout,
        entries: &[wgpu::BindGroupEntry {
            binding: 0,
            resource: light_buffer.as_entire_binding(),
        }],
        label: Some("light_bind_group"),
    })
}
