pub mod configuration;

pub mod estimator {
    pub mod estimate;
    pub mod estimator;
    pub mod analyticalestimator;
    pub mod quadratureestimator;
    pub mod montecarloestimator;
    pub mod riemannestimator;
}

pub mod math {
    pub mod domain {
        pub mod rectangle;
    }
    pub mod surface {
        pub mod surface;
        pub mod paraboloid;
    }
    pub mod quadrature {
        pub mod gausskronrod;
        pub mod adaptivequadrature;
    }
}

pub mod report {
    pub mod scientific;
    pub mod convergencerecord;
    pub mod surfacegrid;
    pub mod surfacerenderer;
    pub mod reporterror;
    pub mod comparisonreport;
}

pub mod volumeerror;
