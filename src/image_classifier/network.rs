use clap::ValueEnum;
use image::imageops::FilterType;
use std::fmt;

/// ImageNet BGR channel means subtracted by the Caffe-style networks.
pub const CAFFE_BGR_MEANS: [f32; 3] = [103.939, 116.779, 123.68];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, ValueEnum)]
pub enum Network {
    #[value(name = "inception_v3")]
    InceptionV3,
    #[value(name = "mobilenet")]
    MobileNet,
    #[value(name = "resnet50")]
    ResNet50,
    #[value(name = "vgg16")]
    Vgg16,
    #[value(name = "vgg19")]
    Vgg19,
    #[value(name = "xception")]
    Xception,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PreprocessMode {
    /// Scale pixels to [-1, 1].
    Tf,
    /// Swap to BGR and subtract [`CAFFE_BGR_MEANS`].
    Caffe,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Preprocessing {
    pub input_size: (u32, u32),
    pub mode: PreprocessMode,
    pub filter: FilterType,
}

impl Preprocessing {
    /// NHWC, batch of one.
    pub fn input_shape(&self) -> [usize; 4] {
        let (width, height) = self.input_size;
        [1, height as usize, width as usize, 3]
    }
}

impl Network {
    pub const ALL: [Network; 6] = [
        Network::InceptionV3,
        Network::MobileNet,
        Network::ResNet50,
        Network::Vgg16,
        Network::Vgg19,
        Network::Xception,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Network::InceptionV3 => "inception_v3",
            Network::MobileNet => "mobilenet",
            Network::ResNet50 => "resnet50",
            Network::Vgg16 => "vgg16",
            Network::Vgg19 => "vgg19",
            Network::Xception => "xception",
        }
    }

    pub fn input_size(&self) -> (u32, u32) {
        match self {
            Network::InceptionV3 | Network::Xception => (299, 299),
            Network::MobileNet | Network::ResNet50 | Network::Vgg16 | Network::Vgg19 => (224, 224),
        }
    }

    pub fn preprocessing(&self) -> Preprocessing {
        let mode = match self {
            Network::InceptionV3 | Network::Xception | Network::MobileNet => PreprocessMode::Tf,
            Network::ResNet50 | Network::Vgg16 | Network::Vgg19 => PreprocessMode::Caffe,
        };

        Preprocessing {
            input_size: self.input_size(),
            mode,
            filter: FilterType::Triangle,
        }
    }
}

impl fmt::Display for Network {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_input_sizes() {
        assert_eq!(Network::InceptionV3.input_size(), (299, 299));
        assert_eq!(Network::Xception.input_size(), (299, 299));
        assert_eq!(Network::Vgg16.input_size(), (224, 224));
        assert_eq!(Network::MobileNet.input_size(), (224, 224));
    }

    #[test]
    fn test_preprocess_modes() {
        assert_eq!(Network::InceptionV3.preprocessing().mode, PreprocessMode::Tf);
        assert_eq!(Network::MobileNet.preprocessing().mode, PreprocessMode::Tf);
        assert_eq!(Network::ResNet50.preprocessing().mode, PreprocessMode::Caffe);
        assert_eq!(Network::Vgg19.preprocessing().mode, PreprocessMode::Caffe);
    }

    #[test]
    fn test_cli_names_round_trip() {
        for network in Network::ALL {
            let parsed = Network::from_str(network.name(), false).unwrap();
            assert_eq!(parsed, network);
        }
    }

    #[test]
    fn test_input_shape_is_nhwc() {
        assert_eq!(Network::Xception.preprocessing().input_shape(), [1, 299, 299, 3]);

        let mut preprocessing = Network::Vgg16.preprocessing();
        preprocessing.input_size = (224, 200);
        assert_eq!(preprocessing.input_shape(), [1, 200, 224, 3]);
    }
}
